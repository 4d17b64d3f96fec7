// src/events.rs
// =============================================================================
// Signals the engine sends to whatever UI is driving it.
//
// The engine never prints anything itself. Instead it hands events to an
// EventSink that the caller passes in:
// - Warning: something worth knowing that doesn't change the result
//   (a link timed out, the run took longer than the soft budget)
// - Error: the root page couldn't be loaded, so nothing was checked
// - Result: the final list of broken URLs
//
// The CLI uses a tokio channel; library users who don't care can pass
// NullSink.
// =============================================================================

use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent {
    Warning(String),
    Error(String),
    Result(Vec<String>),
}

/// Anything that can receive engine events
///
/// Must be Sync because concurrent link checks emit through a shared reference.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: CheckEvent);

    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(CheckEvent::Warning(message.into()));
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(CheckEvent::Error(message.into()));
    }
}

// Sending only fails once the receiver is gone, i.e. nobody is listening
// anymore. That must never abort a check run.
impl EventSink for UnboundedSender<CheckEvent> {
    fn emit(&self, event: CheckEvent) {
        let _ = self.send(event);
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: CheckEvent) {}
}

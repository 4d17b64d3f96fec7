// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging and parse command-line arguments
// 2. Start a small task that prints engine events as they arrive
// 3. Run the check
// 4. Print the report
// 5. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
//
// The engine itself never prints; everything the user sees comes from the
// event channel or the returned report.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use link_inspector::{check_page, BrokenLinkReport, CheckEvent};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with JSON on stdout.
    // RUST_LOG=debug shows every individual fetch.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Ok(2) = the page itself couldn't be checked
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.to_config();

    if !cli.json {
        println!("🔍 Checking links on: {}", cli.url);
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx, cli.json));

    let outcome = check_page(&cli.url, &config, &tx).await;

    // Closing the channel lets the printer finish
    drop(tx);
    printer.await?;

    let report = match outcome {
        Ok(report) => report,
        // Already shown through the error event
        Err(_) => return Ok(2),
    };

    print_report(&report, cli.json)?;

    Ok(if report.is_clean() { 0 } else { 1 })
}

// Renders warnings and errors as they happen
async fn print_events(mut rx: mpsc::UnboundedReceiver<CheckEvent>, json: bool) {
    while let Some(event) = rx.recv().await {
        match event {
            CheckEvent::Warning(message) => eprintln!("⚠️  {}", message),
            CheckEvent::Error(message) => eprintln!("❌ {}", message),
            CheckEvent::Result(urls) => {
                if !json {
                    println!("📋 {} broken link(s) found", urls.len());
                }
            }
        }
    }
}

fn print_report(report: &BrokenLinkReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
        return Ok(());
    }

    if report.is_clean() {
        println!("✅ No broken links found!");
    } else {
        println!("\nBroken links:");
        for link in &report.broken {
            println!("   ❌ {:<60} {}", link.url, link.reason);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   🌐 Checked: {}", report.checked);
    println!("   ❌ Broken: {}", report.broken.len());
    println!("   🔁 Duplicates skipped: {}", report.skipped_duplicates);
    println!("   ⏱️  Took: {} ms", report.elapsed_ms);
    Ok(())
}

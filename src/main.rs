// src/main.rs
// =============================================================================
// Entry point of the regwatch CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load email credentials if --email was given
// 3. Run the requested search against the schedule site
// 4. Optionally filter, then print (and email) the result
// 5. Exit with 0 on success, 2 on any error
// =============================================================================

mod cli;
mod config;
mod notify;
mod schedule;
mod search;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::EmailConfig;
use schedule::{CourseId, QueryContext};
use search::{Outcome, Searcher};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Credentials are read once, up front, so a bad config fails before any
    // time is spent crawling
    let email = match &cli.email {
        Some(recipient) => Some((EmailConfig::load(cli.config.as_deref())?, recipient.clone())),
        None => None,
    };

    let context = QueryContext::new(cli.year, cli.term);
    let searcher = Searcher::new(context, cli.timeout.map(Duration::from_secs))?;

    let mut outcome = run_search(&searcher, &cli.command).await?;
    if cli.filter {
        outcome = outcome.registerable();
    }

    print_outcome(&outcome, cli.json)?;

    if let Some((config, recipient)) = email {
        notify::send_report(&config, &recipient, &outcome).await?;
        eprintln!("📧 Report sent to {}", recipient);
    }

    Ok(0)
}

// Dispatches a subcommand to the matching search
async fn run_search(searcher: &Searcher, command: &Commands) -> Result<Outcome> {
    let outcome = match command {
        Commands::Course { dept, course } => {
            eprintln!("🔍 Searching {} {}", dept, course);
            Outcome::Records(searcher.search_course(dept, course).await?)
        }
        Commands::Section {
            dept,
            course,
            section,
        } => {
            let label = CourseId::section(dept, course, section).label();
            eprintln!("🔍 Checking {}", label);
            Outcome::Section {
                availability: searcher.watch_section(dept, course, section).await?,
                label,
            }
        }
        Commands::Dept { dept } => {
            eprintln!("🔍 Searching department {}", dept);
            Outcome::Records(searcher.search_department(dept).await?)
        }
        Commands::All => {
            let context = searcher.context();
            eprintln!("🔍 Searching every department for {}{}", context.year, context.term);
            Outcome::Records(searcher.search_all().await?)
        }
    };

    Ok(outcome)
}

// Logs go to stderr so stdout stays clean for the result (and for --json)
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "regwatch=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print_table(outcome);
    }
    Ok(())
}

// Prints one row per section, then a short summary
fn print_table(outcome: &Outcome) {
    let rows = outcome.rows();

    if rows.is_empty() {
        match outcome {
            Outcome::Section { label, .. } => println!("⚠️  No seat summary found for {}", label),
            Outcome::Records(_) => println!("⚠️  No sections found"),
        }
        return;
    }

    println!(
        "{:<24} {:>10} {:>12} {:>12}",
        "SECTION", "GENERAL", "RESTRICTED", "REGISTERED"
    );
    println!("{}", "=".repeat(61));

    for (label, seats) in &rows {
        println!(
            "{:<24} {:>10} {:>12} {:>12}",
            label,
            seats.general_seats_remaining,
            seats.restricted_seats_remaining,
            seats.currently_registered
        );
    }

    println!();

    let open = rows
        .iter()
        .filter(|(_, seats)| seats.has_general_seats())
        .count();

    println!("📊 Summary:");
    println!("   ✅ Open: {}", open);
    println!("   ❌ Full: {}", rows.len() - open);
    println!("   📋 Total: {}", rows.len());
}


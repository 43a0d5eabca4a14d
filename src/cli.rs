// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   regwatch [OPTIONS] course  --dept CPSC --course 110
//   regwatch [OPTIONS] section --dept CPSC --course 110 --section 101
//   regwatch [OPTIONS] dept    --dept CPSC
//   regwatch [OPTIONS] all
//
// The options are global, so they can go before or after the subcommand.
// =============================================================================

use crate::schedule::Term;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "regwatch",
    version,
    about = "Check course registration pages for open seats",
    long_about = "regwatch looks up seat availability for a course, a single section, or a whole \
                  department on the course schedule site, prints it, and can email the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Session year (defaults to the current year)
    #[arg(long, global = true, default_value_t = current_year())]
    pub year: i32,

    /// Session term: W (winter) or S (summer)
    #[arg(long, global = true, default_value_t = Term::Winter)]
    pub term: Term,

    /// Only show sections with general seats remaining
    #[arg(long, global = true)]
    pub filter: bool,

    /// Email the result to this address
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub email: Option<String>,

    /// Credentials file used with --email
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log each page fetched to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Every section of one course
    ///
    /// Example: regwatch course --dept CPSC --course 110
    Course {
        #[arg(long)]
        dept: String,

        #[arg(long)]
        course: String,
    },

    /// Seat counts for one section
    ///
    /// Example: regwatch section --dept CPSC --course 110 --section 101
    Section {
        #[arg(long)]
        dept: String,

        #[arg(long)]
        course: String,

        #[arg(long)]
        section: String,
    },

    /// Every section of every course in a department
    ///
    /// Example: regwatch dept --dept CPSC
    Dept {
        #[arg(long)]
        dept: String,
    },

    /// Every department (slow: one request per section on the site)
    All,
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["regwatch", "dept", "--dept", "CPSC"]).unwrap();
        assert_eq!(cli.command, Commands::Dept { dept: "CPSC".to_string() });
        assert_eq!(cli.year, current_year());
        assert_eq!(cli.term, Term::Winter);
        assert!(!cli.filter);
        assert_eq!(cli.email, None);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "regwatch", "section", "--dept", "CPSC", "--course", "110", "--section", "101",
            "--year", "2019", "--term", "S", "--filter", "--email", "me@example.com",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Section {
                dept: "CPSC".to_string(),
                course: "110".to_string(),
                section: "101".to_string(),
            }
        );
        assert_eq!(cli.year, 2019);
        assert_eq!(cli.term, Term::Summer);
        assert!(cli.filter);
        assert_eq!(cli.email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_rejects_unknown_term() {
        let result = Cli::try_parse_from(["regwatch", "--term", "X", "all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_course_requires_course() {
        let result = Cli::try_parse_from(["regwatch", "course", "--dept", "CPSC"]);
        assert!(result.is_err());
    }
}

//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use std::path::PathBuf;

/// `spark-scribe` command tree
#[must_use]
pub fn command() -> Command {
    Command::new("spark-scribe")
        .version(crate::VERSION)
        .about("Audit Spark documents and score contributor reputation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file overriding rewards, thresholds and decay"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("audit")
                .about("Audit one document or every *.md file in a directory")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Document to audit"),
                )
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory of documents to audit in parallel"),
                )
                .group(
                    ArgGroup::new("input")
                        .args(["file", "dir"])
                        .required(true),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output reports as JSON"),
                ),
        )
        .subcommand(
            Command::new("evaluate")
                .about("Run the full pipeline and print the evaluation envelope")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Document to evaluate"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print JSON"),
                ),
        )
        .subcommand(
            Command::new("reputation")
                .about("Score a contribution ledger and flag point farmers")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Ledger JSON file"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write results here instead of stdout"),
                )
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .help("Evaluation date, YYYY-MM-DD (default: today)"),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_parser(value_parser!(f64))
                        .help("Active/lifetime ratio below which scout-heavy accounts are flagged"),
                ),
        )
        .subcommand(Command::new("simulate").about("Score the built-in sample ledger"))
        .subcommand(
            Command::new("template")
                .about("Print a blank Spark template")
                .arg(
                    Arg::new("enhanced")
                        .long("enhanced")
                        .action(ArgAction::SetTrue)
                        .help("Numbered-section template instead of the three-phase one"),
                ),
        )
}

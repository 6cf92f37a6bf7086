use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use spark_cli::{cli, commands, source, ScribeConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let matches = cli::command().get_matches();

    // Logs go to stderr so JSON on stdout stays machine-readable
    let default_level = if matches.get_flag("verbose") { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ScribeConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let scribe = config.scribe();

    match matches.subcommand() {
        Some(("audit", args)) => {
            let paths = match (args.get_one::<PathBuf>("file"), args.get_one::<PathBuf>("dir")) {
                (Some(file), _) => vec![file.clone()],
                (None, Some(dir)) => source::markdown_files(dir)?,
                (None, None) => bail!("audit needs --file or --dir"),
            };
            let outcome = commands::audit(&scribe, &paths)?;
            let output = if args.get_flag("json") {
                outcome.to_json()?
            } else {
                outcome.to_text()
            };
            source::write_output(None, &output)?;
            Ok(if outcome.all_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("evaluate", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .context("evaluate needs --file")?;
            let output = commands::evaluate(&scribe, path, args.get_flag("pretty"))?;
            source::write_output(None, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("reputation", args)) => {
            let input = args
                .get_one::<PathBuf>("input")
                .context("reputation needs --input")?;
            let as_of = match args.get_one::<String>("as-of") {
                Some(value) => spark_reputation::parse_date(value)
                    .with_context(|| format!("--as-of {value}"))?,
                None => today(),
            };
            let load = source::read_ledger(input)?;
            let report = commands::reputation(
                &config,
                &load,
                as_of,
                args.get_one::<f64>("threshold").copied(),
            )?;
            let output = serde_json::to_string_pretty(&report)?;
            source::write_output(args.get_one::<PathBuf>("output").map(PathBuf::as_path), &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("simulate", _)) => {
            source::write_output(None, &commands::simulate()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("template", args)) => {
            source::write_output(None, commands::template(args.get_flag("enhanced")))?;
            Ok(ExitCode::SUCCESS)
        }
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("no command given"),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

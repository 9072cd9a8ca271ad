//! `epidash` command line
//!
//! Lists the dashboard pages, renders one page as text or JSON, or checks
//! that the configured source files load.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use epi_dashboard::{
    build_page, logging, render, render_menu, DashboardConfig, DataLoader, OutputFormat, Page,
    UiState,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("epidash")
        .version(epi_dashboard::VERSION)
        .about("Tuberculosis case statistics dashboard")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to TOML configuration (defaults built in)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (RUST_LOG overrides)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("pages").about("List menu pages"))
        .subcommand(
            Command::new("show")
                .about("Render one page")
                .arg(
                    Arg::new("page")
                        .default_value("home")
                        .help("home | disease | epidemiology | trend | about"),
                )
                .arg(
                    Arg::new("region")
                        .long("region")
                        .help("Restrict the trend page to one regency/city"),
                ),
        )
        .subcommand(Command::new("check").about("Load both source files and report their shape"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<DashboardConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let format = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("pages", _)) => {
            if format == OutputFormat::Json {
                let pages: Vec<_> = Page::ALL
                    .iter()
                    .map(|p| serde_json::json!({ "slug": p.slug(), "title": p.title() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                println!("{}", render_menu(&UiState::default()));
            }
        }
        Some(("check", _)) => {
            let loader = DataLoader::new(&config);
            let data = loader.load(&config).context("loading source data")?;
            println!("Case table:  {} regions", data.records.len());
            println!(
                "Trend table: {} regions, years {:?}, {} records",
                data.trend.regions().len(),
                data.trend.years(),
                data.trend.long.len()
            );
        }
        other => {
            let (page, region) = match other {
                Some(("show", args)) => (
                    args.get_one::<String>("page")
                        .map_or(Ok(Page::Home), |s| s.parse::<Page>())?,
                    args.get_one::<String>("region").cloned(),
                ),
                _ => (Page::Home, None),
            };
            let mut state = UiState::new(page);
            state.region_filter = region;

            let data = DataLoader::new(&config)
                .load(&config)
                .context("loading source data")?;
            let view = build_page(&state, &data, &config)?;
            println!("{}", render(&view, &state, format)?);
        }
    }
    Ok(())
}

/// One-line failure report with the full context chain
fn error_line(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::init(matches.get_count("verbose"), matches.get_flag("log-json"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

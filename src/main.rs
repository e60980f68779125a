use anyhow::Context;
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches};
use fsm_designer::command::{Command, Diagnostic, Dispatcher};
use fsm_designer::session::{self, SessionConfig};
use tracing::level_filters::LevelFilter;
use tracing::trace;
use tracing_subscriber::prelude::*;

fn cli() -> clap::Command {
    clap::Command::new("fsm-designer")
        .about("Interactive editor and simulator for deterministic finite automata")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Command script, or .fs/.json snapshot, to load before the session starts"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("no-banner")
                .long("no-banner")
                .action(ArgAction::SetTrue)
                .help("Do not print the version banner"),
        )
}

fn config(matches: &ArgMatches) -> SessionConfig {
    let verbosity = match matches.get_one::<String>("verbosity").map(String::as_str) {
        Some("trace") => LevelFilter::TRACE,
        Some("debug") => LevelFilter::DEBUG,
        Some("info") => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };

    SessionConfig {
        show_banner: !matches.get_flag("no-banner"),
        verbosity,
        ..SessionConfig::default()
    }
}

fn setup_logging(level: LevelFilter) {
    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = config(&matches);
    setup_logging(config.verbosity);

    let mut dispatcher = Dispatcher::stdout();
    if config.show_banner {
        dispatcher.notify(&Diagnostic::output(session::banner(Local::now())));
    }

    if let Some(file) = matches.get_one::<String>("file") {
        dispatcher.execute(Command::Load(file.clone()));
    }

    session::run(&config, std::io::stdin().lock(), &mut dispatcher)
        .context("failed to read commands from stdin")
}

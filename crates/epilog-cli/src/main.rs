mod cli;
mod repl;
mod report;

use clap::{Args, Parser, Subcommand};
use epilog::{EngineConfig, Session, DEFAULT_FRAME_LIMIT};
use std::path::PathBuf;

pub(crate) const COLOR_RESET: &str = "\x1b[0m";
pub(crate) const COLOR_GREEN: &str = "\x1b[32m";
pub(crate) const COLOR_RED: &str = "\x1b[31m";
pub(crate) const COLOR_YELLOW: &str = "\x1b[33m";
pub(crate) const COLOR_CYAN: &str = "\x1b[36m";

#[derive(Parser)]
#[command(
    name = "epilog",
    version,
    about = "Deductive inference with negation, aggregation and hypothetical reasoning",
    long_about = None,
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,
    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Engine settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub(crate) struct EngineArgs {
    /// Inferences plus instantiations a single query may spend
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FRAME_LIMIT, global = true)]
    frame_limit: usize,
    /// Refuse bindings that would create cyclic terms
    #[arg(long, global = true)]
    occurs_check: bool,
    /// Scan facts and rules instead of indexing them
    #[arg(long, global = true)]
    no_index: bool,
    /// Log Call/Exit/Redo/Fail events for a relation at trace level
    #[arg(long, value_name = "RELATION", global = true)]
    trace: Vec<String>,
}

impl EngineArgs {
    pub(crate) fn session(&self) -> Session {
        let mut config = EngineConfig::new()
            .with_frame_limit(self.frame_limit)
            .with_occurs_check(self.occurs_check);
        for relation in &self.trace {
            config.trace(relation);
        }
        Session::with_config(config, !self.no_index)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a query against a program file
    Query {
        /// Program of facts and rules
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Query, e.g. 'grandparent(X, Z)'
        #[arg(value_name = "QUERY")]
        query: String,
        /// Print instances of this term instead of variable bindings
        #[arg(long, value_name = "TERM")]
        template: Option<String>,
        /// Print every answer
        #[arg(long, conflicts_with = "limit")]
        all: bool,
        /// Print at most this many answers
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Check programs for mixed arities, unsafe rules and unstratified rules
    Check {
        /// One or more program files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Watch the file(s) for changes and re-run the checks
        #[arg(long)]
        watch: bool,
    },
    /// Start the interactive REPL
    Repl {
        /// Optional program file to preload into the REPL
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Query {
            file,
            query,
            template,
            all,
            limit,
        } => {
            let limit = if all { None } else { Some(limit.unwrap_or(1)) };
            let request = cli::query::Request {
                file: &file,
                query: &query,
                template: template.as_deref(),
                limit,
            };
            if !cli::query::run(&cli.engine, &request) {
                std::process::exit(1);
            }
        }
        Commands::Check { files, watch } => {
            cli::check::run(&cli.engine, &files, watch);
        }
        Commands::Repl { input } => {
            if let Err(e) = cli::repl::run(&cli.engine, input.as_deref()) {
                eprintln!("Failed to start REPL: {}", e);
                std::process::exit(1);
            }
        }
    }
}

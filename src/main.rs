use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use rosterchk::cli::output::{self, OutputFormat};
use rosterchk::{dict, Config, RosterValidator};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rosterchk")]
#[command(version, about = "Check typed names against a registered roster", long_about = None)]
struct Cli {
    /// Files with one name per entry (reads stdin when omitted)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Entry delimiter: any single character (e.g. ,) or one of the escapes \n, \t, \r
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if problems are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Log each classified entry to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Rebuild the roster and dictionary from the registration sheet export
    Reload {
        /// CSV export to read instead of the configured one
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Dictionary inspection
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// Show where the name database lives and how big it is
    Info,
    /// List every distinct registered name
    Words,
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "\\n" => Ok('\n'),
        "\\t" => Ok('\t'),
        "\\r" => Ok('\r'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("delimiter must be a single character, got {:?}", s)),
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "rosterchk=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "rosterchk", &mut io::stdout());
        return Ok(());
    }

    init_tracing(cli.verbose);
    let colored = !cli.no_color;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, cli.delimiter, colored);
    }

    let config = Config::load(cli.delimiter, None)?;
    let store = config.store()?;
    let validator = RosterValidator::from_store(&store, &config)?;

    let inputs: Vec<(String, String)> = if cli.files.is_empty() {
        let text = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
        vec![("stdin".to_string(), text)]
    } else {
        cli.files
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))
                    .map(|text| (path.display().to_string(), text))
            })
            .collect::<Result<_>>()?
    };

    let mut total_errors = 0;
    let mut rejected = false;

    for (source, text) in &inputs {
        match validator.check_lines(text) {
            Ok(lines) => {
                total_errors += output::error_count(&lines);
                output::print_results(source, &lines, colored, cli.format)?;
            }
            Err(rejection) => {
                rejected = true;
                output::print_rejection(source, &rejection, colored, cli.format)?;
            }
        }
    }

    if cli.format == OutputFormat::Text && !rejected {
        output::print_check_summary(total_errors, inputs.len(), colored);
    }

    // Exit with appropriate code
    if rejected {
        std::process::exit(2);
    }
    if total_errors > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(command: Commands, delimiter: Option<char>, colored: bool) -> Result<()> {
    match command {
        Commands::Reload { input } => {
            let config = Config::load(delimiter, input)?;
            dict::manager::reload(&config, colored)?;
        }
        Commands::Dict { action } => {
            let config = Config::load(delimiter, None)?;
            match action {
                DictCommands::Info => dict::manager::show_info(&config)?,
                DictCommands::Words => dict::manager::list_words(&config)?,
            }
        }
    }
    Ok(())
}

use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use tree_selector::cli::{self, CheckOptions, CheckResult, CliError};

#[derive(ClapParser)]
#[command(name = "treesel")]
#[command(about = "treesel - select nodes from labeled trees with path expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a selector and run it against a JSON tree
    Check {
        /// The selector to run
        selector: String,

        /// JSON tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print a JSON tree in human-readable form
    Tree {
        /// JSON tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Run example selectors against a built-in sample tree
    Demo,

    /// Show the selector syntax reference
    Docs,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            selector,
            input,
            pretty,
            syntax_only,
        } => run_check(selector, input, pretty, syntax_only),
        Commands::Tree { input } => read_input(input).and_then(|input| {
            let rendered = cli::execute_tree(input.as_deref())?;
            print!("{}", rendered);
            Ok(())
        }),
        Commands::Demo => {
            print!("{}", cli::run_demo());
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_syntax_reference());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Use the explicit input if given, otherwise piped stdin.
fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    selector: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = if syntax_only { input } else { read_input(input)? };

    let options = CheckOptions {
        selector,
        input,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("Syntax is valid: {}", canonical),
        CheckResult::Success(json) => println!("{}", json),
    }
    Ok(())
}

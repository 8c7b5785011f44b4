use clap::{Parser as ClapParser, Subcommand};
use predicate_sql::CompilerOptions;
use predicate_sql::cli::{self, CliError, CompileOptions, CompileOutcome};
use predicate_sql::parser::DEFAULT_MAX_DEPTH;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "predsql")]
#[command(about = "predsql - Compile predicate return-expressions into parameterized SQL conditions")]
#[command(version)]
struct Cli {
    /// Log compiler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON token stream into a SQL fragment and its bindings
    Compile {
        /// JSON request (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't render SQL
        #[arg(long)]
        syntax_only: bool,

        /// Deepest allowed nesting of parenthesized groups
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// List the functions usable in call position
    Functions,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            input,
            pretty,
            syntax_only,
            max_depth,
        } => run_compile(input, pretty, syntax_only, max_depth),
        Commands::Functions => {
            for name in predicate_sql::functions::builtin_registry().names() {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PREDSQL_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run_compile(
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    max_depth: usize,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CompileOptions {
        input,
        pretty,
        syntax_only,
        compiler: CompilerOptions { max_depth },
    };

    match cli::execute_compile(&options)? {
        CompileOutcome::SyntaxValid => println!("Syntax is valid"),
        CompileOutcome::Success(output) => println!("{}", output),
    }
    Ok(())
}

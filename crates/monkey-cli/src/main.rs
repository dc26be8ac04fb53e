use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use monkey_parse::parse_source;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "monkey")]
#[command(about = "Monkey: a small dynamic language with closures and AST macros")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a Monkey program
    Run {
        /// Path to the source file
        file: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to the source file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, out } => cmd_run(&file, out),
        Commands::Parse { file, format } => cmd_parse(&file, format),
    }
}

fn load_source(path: &str) -> Result<String> {
    let src = std::fs::read_to_string(path)?;
    if src.len() > MAX_SOURCE_SIZE {
        anyhow::bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

fn cmd_run(file: &str, out: Option<String>) -> Result<()> {
    let src = load_source(file)?;
    match out {
        Some(path) => {
            let mut sink = std::fs::File::create(&path)?;
            monkey_cli::driver::run_source(&src, &mut sink)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = stdout.lock();
            monkey_cli::driver::run_source(&src, &mut sink)?;
        }
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let src = load_source(file)?;
    let (program, errors) = parse_source(&src);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("parser error: {error}");
        }
        std::process::exit(1);
    }
    match format {
        Format::Pretty => println!("{program:#?}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}

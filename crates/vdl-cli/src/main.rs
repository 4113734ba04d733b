use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use vdl::config::VdlConfig;

#[derive(Parser)]
#[command(name = "vdl")]
#[command(about = "Lower validated VDL programs into the intermediate representation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a validated program (JSON or YAML) into the IR
    Ir {
        /// Program file produced by the analyzer
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Configuration file (defaults to vdl.toml next to the input)
        #[arg(short, long, env = "VDL_CONFIG")]
        config: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long, env = "VDL_MINIFY")]
        minify: bool,

        /// Nesting limit for constants and spreads
        #[arg(long, env = "VDL_MAX_DEPTH")]
        max_depth: Option<usize>,
    },

    /// Print or write the JSON Schema of the IR
    Schema {
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        LevelFilter::TRACE
    } else if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(cli.debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ir {
            input,
            output,
            config,
            minify,
            max_depth,
        } => {
            let dir = input.parent().unwrap_or_else(|| Path::new("."));
            let config = VdlConfig::load(config.as_deref(), dir)?.with_overrides(minify, max_depth);
            vdl::generate_ir(&input, &output, &config)?;
            Ok(())
        }
        Commands::Schema { output } => match output {
            Some(path) => vdl::write_schema(&path),
            None => {
                println!("{}", vdl::render_schema()?);
                Ok(())
            }
        },
    }
}

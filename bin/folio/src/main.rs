//! Folio CLI
//!
//! Validates a blog's content directory and inspects the loaded collection.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Validate and query a blog's content collection"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Content directory (overrides content.dir)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate every document and report all problems
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// List documents, newest first
    List {
        /// Only documents with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Include draft documents
        #[arg(long)]
        drafts: bool,
    },
    /// Show one document's metadata
    Show {
        /// Document slug
        slug: String,
        /// Also print the raw body
        #[arg(long)]
        body: bool,
    },
    /// List tags with document counts
    Tags {
        /// Include draft documents
        #[arg(long)]
        drafts: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    let dir = cli.dir.as_deref();

    match cli.command {
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, dir, strict)?;
        }
        Commands::List { tag, drafts } => {
            folio::cmd::list::run(&cli.config, dir, tag.as_deref(), drafts)?;
        }
        Commands::Show { slug, body } => {
            folio::cmd::show::run(&cli.config, dir, &slug, body)?;
        }
        Commands::Tags { drafts } => {
            folio::cmd::tags::run(&cli.config, dir, drafts)?;
        }
    }

    Ok(())
}

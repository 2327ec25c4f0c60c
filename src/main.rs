mod commands;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{ListCommand, RenderCommand, Sources};
use std::path::PathBuf;
use template_interface::Kind;

#[derive(Parser)]
#[command(name = "tmpl")]
#[command(about = "Render text or HTML templates through one interface", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template to stdout
    Render {
        /// Template variant: text (no escaping) or html (escaped values)
        #[arg(short, long, env = "TMPL_KIND", default_value = "text")]
        kind: Kind,

        /// JSON or YAML file with the data to render
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Name of the template to execute (defaults to the first file)
        #[arg(short, long)]
        template: Option<String>,

        /// Load templates matching a glob pattern
        #[arg(short, long)]
        glob: Option<String>,

        /// Custom action delimiters
        #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
        delims: Option<Vec<String>>,

        /// Template files
        files: Vec<PathBuf>,
    },

    /// List the templates defined by a set of files
    List {
        /// Template variant: text or html
        #[arg(short, long, env = "TMPL_KIND", default_value = "text")]
        kind: Kind,

        /// Load templates matching a glob pattern
        #[arg(short, long)]
        glob: Option<String>,

        /// Template files
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        output::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            kind,
            data,
            template,
            glob,
            delims,
            files,
        } => {
            let sources = Sources::new(glob, files)?;
            RenderCommand::execute(kind, &sources, data.as_deref(), template.as_deref(), delims)?;
        }
        Commands::List { kind, glob, files } => {
            let sources = Sources::new(glob, files)?;
            ListCommand::execute(kind, &sources)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose >= 2))
        .init();
}

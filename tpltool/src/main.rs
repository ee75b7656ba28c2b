use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use importtpl::TemplateDescription;
use log::LevelFilter;
use tpltool::{ctx::AppContext, outline};

/// Spreadsheet import template tool
#[derive(Parser, Debug)]
#[command(name = "tpltool", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a template description into template rows
    Fields {
        /// Template description (.json or .toml)
        #[arg(short, long, value_name = "FILE")]
        description: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Rebuild the nested value from flat answers
    Values {
        /// Template description (.json or .toml)
        #[arg(short, long, value_name = "FILE")]
        description: PathBuf,

        /// Answers file; defaults to `<description>-answers.<ext>`
        #[arg(short, long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Do not attach a `client_id` to list rows
        #[arg(long)]
        no_client_id: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate a template description
    Check {
        /// Template description (.json or .toml)
        #[arg(short, long, value_name = "FILE")]
        description: PathBuf,
    },
    /// Print the JSON Schema of the template description format
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Outline,
}

fn to_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Fields {
            description,
            format,
        } => {
            let mut ctx = AppContext::new(description, cli.debug);
            ctx.load_description().await?;
            let fields = ctx.fields()?;
            match format {
                Format::Json => println!("{}", to_json(&fields, true)?),
                Format::Outline => outline::print(&fields, ctx.debug),
            }
        }
        Command::Values {
            description,
            answers,
            no_client_id,
            pretty,
        } => {
            let mut ctx = AppContext::new(description, cli.debug);
            ctx.paths.answers = answers;
            ctx.load_description().await?;
            let value = ctx.values(!no_client_id).await?;
            println!("{}", to_json(&value, pretty)?);
        }
        Command::Check { description } => {
            let mut ctx = AppContext::new(description, cli.debug);
            ctx.load_description().await?;
            ctx.print_summary()?;
        }
        Command::Schema => {
            let schema = schemars::schema_for!(TemplateDescription);
            println!("{}", to_json(&schema, true)?);
        }
    }

    Ok(())
}

//! nbfolio CLI - Notebook portfolio pages.

mod colors;
mod export;
mod render;
mod watch;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nbfolio")]
#[command(about = "Render Jupyter notebooks into portfolio pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a notebook's rendered contents to the terminal
    Render {
        /// Path to the notebook (.ipynb file)
        notebook: String,
    },

    /// Export the portfolio page as a standalone HTML file
    Export {
        /// Page config (JSON); the built-in page is used when omitted
        #[arg(short, long)]
        config: Option<String>,

        /// Output path for the HTML file
        #[arg(short, long, default_value = "index.html")]
        output: String,

        /// Regenerate the page when the config or its assets change
        #[arg(short, long)]
        watch: bool,
    },

    /// Write the built-in page config to a file for editing
    Init {
        /// Path of the config file to create
        #[arg(default_value = "page.json")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Attach recovery hints to notebook errors
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(render_err) = err.downcast_ref::<nbfolio_render::RenderError>() {
            anyhow::anyhow!("{}", render_err.with_hint())
        } else {
            err
        }
    };

    match cli.command {
        Commands::Render { notebook } => render::execute(&notebook).map_err(format_error)?,

        Commands::Export {
            config,
            output,
            watch,
        } => export::execute(config.as_deref(), &output, watch).map_err(format_error)?,

        Commands::Init { path } => init_config(&path)?,
    }

    Ok(())
}

/// Write the built-in page config.
fn init_config(path: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(path);
    if path.exists() {
        anyhow::bail!("File {} already exists", path.display());
    }

    let json = nbfolio_page::PageConfig::default().to_json()?;
    std::fs::write(path, json)?;
    println!("Created page config: {}", path.display());

    Ok(())
}

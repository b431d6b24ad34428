//! Export command implementation for nbfolio CLI.
//!
//! Generates the standalone HTML page, once or on every input change.

use std::path::{Path, PathBuf};
use std::time::Instant;

use nbfolio_page::{PageConfig, export_page};

use crate::colors;
use crate::watch::{FileEvent, FileWatcher};

/// Execute the export command.
pub fn execute(config_path: Option<&str>, output_path: &str, watch: bool) -> anyhow::Result<()> {
    let output = Path::new(output_path);

    println!(
        "\n{}nbfolio Export{} - {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::CYAN,
        config_path.unwrap_or("built-in page"),
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    let config = load_config(config_path)?;
    export_once(&config, output)?;

    if watch {
        watch_and_export(config_path, config, output)?;
    }

    Ok(())
}

/// Load the config file, or the built-in page resolved against the working directory.
fn load_config(config_path: Option<&str>) -> anyhow::Result<PageConfig> {
    match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                anyhow::bail!("Page config not found: {}", path.display());
            }
            Ok(PageConfig::load(path)?)
        }
        None => Ok(PageConfig {
            base_dir: std::env::current_dir()?,
            ..PageConfig::default()
        }),
    }
}

/// Generate the page once.
fn export_once(config: &PageConfig, output: &Path) -> anyhow::Result<()> {
    let start = Instant::now();

    print!(
        "  {} ... ",
        output.file_name().unwrap_or_default().to_string_lossy()
    );
    colors::flush_stdout();

    export_page(config, output)?;

    println!(
        "{}✓{} ({:.2}ms)",
        colors::GREEN,
        colors::RESET,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Regenerate the page whenever the config or one of its assets changes.
fn watch_and_export(
    config_path: Option<&str>,
    mut config: PageConfig,
    output: &Path,
) -> anyhow::Result<()> {
    let watched = |config: &PageConfig| -> Vec<PathBuf> {
        let mut paths = config.asset_paths();
        if let Some(path) = config_path {
            paths.push(PathBuf::from(path));
        }
        paths
    };

    let mut watcher = FileWatcher::new(&watched(&config))?;
    println!(
        "\n{}Watching for changes... (Ctrl+C to stop){}",
        colors::DIM,
        colors::RESET
    );

    while let Some(event) = watcher.recv() {
        match event {
            FileEvent::Modified(path) => {
                println!(
                    "\n{}{} changed, regenerating...{}",
                    colors::YELLOW,
                    path.display(),
                    colors::RESET
                );

                // A changed config can point at different assets.
                match load_config(config_path) {
                    Ok(reloaded) => {
                        if reloaded.asset_paths() != config.asset_paths() {
                            match FileWatcher::new(&watched(&reloaded)) {
                                Ok(new_watcher) => watcher = new_watcher,
                                Err(e) => eprintln!(
                                    "  {}Error:{} {} (still watching previous files)",
                                    colors::RED,
                                    colors::RESET,
                                    e
                                ),
                            }
                        }
                        config = reloaded;
                    }
                    Err(e) => {
                        eprintln!("  {}Error:{} {}", colors::RED, colors::RESET, e);
                        continue;
                    }
                }

                if let Err(e) = export_once(&config, output) {
                    eprintln!("  {}Error:{} {}", colors::RED, colors::RESET, e);
                }
            }
            FileEvent::Removed(path) => {
                eprintln!(
                    "\n{}Warning:{} {} removed",
                    colors::YELLOW,
                    colors::RESET,
                    path.display()
                );
                if let Err(e) = export_once(&config, output) {
                    eprintln!("  {}Error:{} {}", colors::RED, colors::RESET, e);
                }
            }
        }
    }

    Ok(())
}

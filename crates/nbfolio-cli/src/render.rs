//! Render command implementation for nbfolio CLI.
//!
//! Prints a notebook's display blocks to the terminal.

use std::path::Path;
use std::time::Instant;

use nbfolio_render::{CellKind, NotebookRenderer, RenderBlock};

use crate::colors;

/// Execute the render command.
pub fn execute(notebook_path: &str) -> anyhow::Result<()> {
    let path = Path::new(notebook_path);
    let start = Instant::now();

    let blocks = NotebookRenderer::new().render_file(path)?;

    println!(
        "\n{}Notebook Contents{} - {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::CYAN,
        path.display(),
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    print_blocks(&blocks);

    println!("{}", "─".repeat(50));
    println!(
        "{}Rendered{} {} blocks in {:.2}ms",
        colors::GREEN,
        colors::RESET,
        blocks.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Print blocks in a readable format.
fn print_blocks(blocks: &[RenderBlock]) {
    let mut awaiting_source = false;
    let mut outputs_labelled = false;

    for block in blocks {
        match block {
            RenderBlock::Heading { kind, .. } => {
                awaiting_source = *kind == CellKind::Code;
                outputs_labelled = false;
                println!(
                    "\n{}{}{}",
                    colors::CYAN,
                    block.heading_label().unwrap_or_default(),
                    colors::RESET
                );
            }
            RenderBlock::Markdown(text) => print_indented(text),
            RenderBlock::Code { text, language } => {
                if awaiting_source {
                    awaiting_source = false;
                } else {
                    label_outputs(&mut outputs_labelled);
                }
                println!("  {}[{}]{}", colors::DIM, language, colors::RESET);
                print_indented(text);
            }
            RenderBlock::PlainText(text) => {
                label_outputs(&mut outputs_labelled);
                print_indented(text);
            }
            RenderBlock::Image { mime, bytes } => {
                label_outputs(&mut outputs_labelled);
                println!(
                    "  {}[{}, {} bytes]{}",
                    colors::DIM,
                    mime,
                    bytes.len(),
                    colors::RESET
                );
            }
        }
    }
}

fn label_outputs(labelled: &mut bool) {
    if !*labelled {
        println!("  {}Output:{}", colors::BOLD, colors::RESET);
        *labelled = true;
    }
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("  {}", line);
    }
}

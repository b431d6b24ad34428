//! Markdown to HTML conversion.

use pulldown_cmark::{Event, Options, Parser, html};

/// How raw HTML embedded in markdown is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawHtml {
    /// Emit it unchanged. Only for trusted authors.
    #[default]
    PassThrough,
    /// Emit it as escaped text.
    Escape,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str, raw_html: RawHtml) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match (raw_html, event) {
        (RawHtml::Escape, Event::Html(text) | Event::InlineHtml(text)) => Event::Text(text),
        (_, event) => event,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

// Paragraph extraction with a fixed boilerplate denylist

use scraper::{Html, Selector};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Paragraphs dropped when their whole text is one of these.
pub const EXACT_NOISE: &[&str] = &["…", "###", "Comments are closed.", "Leave a Comment"];

/// Paragraphs dropped when their text contains any of these.
pub const NOISE_MARKERS: &[&str] = &[
    "Partial transcript",
    "Excerpts from a",
    "Donald Trump:",
    "Transcript:",
    "Category:",
    "RSS Feed",
    "Posted by News Editor",
    "What The Folly?!",
];

pub fn is_boilerplate(text: &str) -> bool {
    text.is_empty()
        || EXACT_NOISE.contains(&text)
        || NOISE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Returns `None` for boilerplate. Otherwise the ellipsis character is spelled
/// out as three periods and the text ends in a space.
pub fn clean_paragraph(text: &str) -> Option<String> {
    if is_boilerplate(text) {
        return None;
    }

    let mut cleaned = text.replace('…', "...");
    if !cleaned.ends_with(' ') {
        cleaned.push(' ');
    }
    Some(cleaned)
}

/// Apply `clean_paragraph` to each paragraph, keeping order.
pub fn filter_paragraphs<I, S>(paragraphs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .filter_map(|p| clean_paragraph(p.as_ref()))
        .collect()
}

/// The cleaned text of every `<p>` element in `html`, in document order.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    filter_paragraphs(
        document
            .select(&PARAGRAPH)
            .map(|p| p.text().collect::<String>()),
    )
}

/// `extract_paragraphs` joined into one text, one paragraph per line.
pub fn extract_text(html: &str) -> String {
    extract_paragraphs(html).join("\n")
}

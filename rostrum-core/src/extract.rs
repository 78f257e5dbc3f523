use crate::boilerplate::extract_text;
use crate::data::{ArticleTextsFile, RawArticlesFile, SpeechCorpusFile, load_json, save_json};
use crate::error::Result;
use crate::merge::{ExtractedText, merge_speeches};
use rostrum_scanner::RawArticle;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Options for the `extract` stage.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub raw_articles: PathBuf,
    pub corpus: PathBuf,
    /// Also write the per-article texts here, before merging.
    pub articles_out: Option<PathBuf>,
    /// Skip articles whose name does not mention "transcript".
    pub transcripts_only: bool,
}

impl ExtractOptions {
    pub fn new(raw_articles: impl Into<PathBuf>, corpus: impl Into<PathBuf>) -> Self {
        Self {
            raw_articles: raw_articles.into(),
            corpus: corpus.into(),
            articles_out: None,
            transcripts_only: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub articles: usize,
    /// Articles whose download had failed.
    pub missing_html: usize,
    pub not_transcripts: usize,
    pub texts: usize,
    pub speeches: usize,
}

/// Cleaned text for every article that has HTML, in input order.
///
/// Articles without HTML are skipped, as are (with `transcripts_only`)
/// articles whose name does not contain "transcript".
pub fn extract_articles(
    articles: &[RawArticle],
    transcripts_only: bool,
) -> (Vec<ExtractedText>, ExtractSummary) {
    let mut summary = ExtractSummary {
        articles: articles.len(),
        ..ExtractSummary::default()
    };
    let mut texts = Vec::with_capacity(articles.len());

    for article in articles {
        if transcripts_only && !article.name.to_lowercase().contains("transcript") {
            warn!("Not a transcript: {}", article.name);
            summary.not_transcripts += 1;
            continue;
        }
        let Some(ref html) = article.html else {
            warn!("No HTML for {} ({}), skipping", article.name, article.url);
            summary.missing_html += 1;
            continue;
        };

        debug!("Stripping HTML from {}", article.name);
        texts.push(ExtractedText {
            name: article.name.clone(),
            text: extract_text(html),
        });
    }

    summary.texts = texts.len();
    (texts, summary)
}

/// Turn the raw articles file into the speech corpus.
pub fn execute_extract(options: ExtractOptions) -> Result<ExtractSummary> {
    let ExtractOptions {
        raw_articles,
        corpus,
        articles_out,
        transcripts_only,
    } = options;

    let pages: RawArticlesFile = load_json(&raw_articles)?;
    let (texts, mut summary) = extract_articles(&pages.transcripts, transcripts_only);
    info!("Texts: {}", texts.len());

    let speeches = merge_speeches(&texts);
    summary.speeches = speeches.len();
    info!("Number of speeches: {}", speeches.len());

    if let Some(ref path) = articles_out {
        save_json(&ArticleTextsFile::new(texts), path)?;
    }
    save_json(&SpeechCorpusFile::new(speeches), &corpus)?;

    Ok(summary)
}

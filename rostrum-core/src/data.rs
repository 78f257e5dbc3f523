// JSON files exchanged between the update, retrieve and extract stages

use crate::error::DataError;
use crate::merge::{ExtractedText, Speech};
use rostrum_scanner::{CandidateEntry, ListingCache, ListingCrawl, RawArticle};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Schema version written into every file. Files without a `version` field
/// are read as this version.
pub const SCHEMA_VERSION: u32 = 1;

fn current_version() -> u32 {
    SCHEMA_VERSION
}

pub trait Versioned {
    fn version(&self) -> u32;
}

macro_rules! versioned {
    ($($file:ty),+ $(,)?) => {
        $(
            impl Versioned for $file {
                fn version(&self) -> u32 {
                    self.version
                }
            }
        )+
    };
}

/// Listing pages cached between `update` runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCacheFile {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(flatten)]
    pub cache: ListingCache,
}

/// Every article discovered so far, plus the listing pages paginated over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateListFile {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub transcripts: Vec<CandidateEntry>,
    /// Listing page URLs, sorted and deduplicated.
    #[serde(default)]
    pub results: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticlesFile {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub transcripts: Vec<RawArticle>,
}

/// Per-article texts, written before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTextsFile {
    #[serde(default = "current_version")]
    pub version: u32,
    pub texts: Vec<ExtractedText>,
    pub count: usize,
}

/// The final corpus, one entry per speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechCorpusFile {
    #[serde(default = "current_version")]
    pub version: u32,
    pub speeches: Vec<Speech>,
}

versioned!(
    ListingCacheFile,
    CandidateListFile,
    RawArticlesFile,
    ArticleTextsFile,
    SpeechCorpusFile,
);

impl Default for ListingCacheFile {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            cache: ListingCache::new(),
        }
    }
}

impl Default for CandidateListFile {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            transcripts: Vec::new(),
            results: Vec::new(),
        }
    }
}

impl CandidateListFile {
    /// A fresh set of every recorded candidate URL.
    pub fn seen_urls(&self) -> HashSet<String> {
        self.transcripts.iter().map(|t| t.url.clone()).collect()
    }

    /// Append the crawl's new candidates and merge its visited pages into
    /// `results`.
    pub fn record_crawl(&mut self, crawl: &ListingCrawl) {
        self.transcripts.extend(crawl.new_candidates.iter().cloned());
        let results: BTreeSet<String> = self
            .results
            .drain(..)
            .chain(crawl.visited_pages.iter().cloned())
            .collect();
        self.results = results.into_iter().collect();
    }
}

impl Default for RawArticlesFile {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            transcripts: Vec::new(),
        }
    }
}

impl RawArticlesFile {
    /// A fresh set of every URL already attempted, including failed ones.
    pub fn downloaded_urls(&self) -> HashSet<String> {
        self.transcripts.iter().map(|t| t.url.clone()).collect()
    }

    pub fn failed_count(&self) -> usize {
        self.transcripts.iter().filter(|t| t.html.is_none()).count()
    }
}

impl ArticleTextsFile {
    pub fn new(texts: Vec<ExtractedText>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            count: texts.len(),
            texts,
        }
    }
}

impl SpeechCorpusFile {
    pub fn new(speeches: Vec<Speech>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            speeches,
        }
    }
}

/// Load a file that must exist.
pub fn load_json<T>(path: &Path) -> Result<T, DataError>
where
    T: DeserializeOwned + Versioned,
{
    debug!("Loading JSON from {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataError::MissingInput(path.to_path_buf()),
        _ => DataError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let value: T = serde_json::from_str(&content).map_err(|e| DataError::MalformedJson {
        path: path.to_path_buf(),
        source: e,
    })?;

    if value.version() > SCHEMA_VERSION {
        return Err(DataError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: value.version(),
            supported: SCHEMA_VERSION,
        });
    }
    Ok(value)
}

/// Load a file, starting from an empty one when it does not exist yet.
///
/// With `strict`, a missing file is an error instead.
pub fn load_json_or_default<T>(path: &Path, strict: bool) -> Result<T, DataError>
where
    T: DeserializeOwned + Versioned + Default,
{
    match load_json(path) {
        Err(DataError::MissingInput(_)) if !strict => {
            warn!("{} doesn't exist, starting a new one", path.display());
            Ok(T::default())
        }
        other => other,
    }
}

pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), DataError> {
    debug!("Saving JSON to {}", path.display());
    let content = serde_json::to_string(value).map_err(|e| DataError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, content).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

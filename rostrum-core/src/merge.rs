use crate::naming::speech_basename;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cleaned text of one downloaded article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub name: String,
    pub text: String,
}

/// A complete speech. `name` is the basename shared by all its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub name: String,
    pub text: String,
}

/// Group texts by `speech_basename` and concatenate each group.
///
/// Parts are joined in input order, not by part number, and speeches are
/// returned in order of first appearance.
pub fn merge_speeches(texts: &[ExtractedText]) -> Vec<Speech> {
    let mut speeches: IndexMap<String, String> = IndexMap::new();
    for extracted in texts {
        match speeches.entry(speech_basename(&extracted.name)) {
            Entry::Vacant(entry) => {
                debug!("New speech: {}", entry.key());
                entry.insert(extracted.text.clone());
            }
            Entry::Occupied(mut entry) => {
                debug!("Appending '{}' to {}", extracted.name, entry.key());
                entry.get_mut().push_str(&extracted.text);
            }
        }
    }
    debug!("Number of speeches: {}", speeches.len());

    speeches
        .into_iter()
        .map(|(name, text)| Speech { name, text })
        .collect()
}

/// Number of distinct speeches the given article names belong to.
pub fn count_speeches<'a, I>(names: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(speech_basename)
        .collect::<std::collections::HashSet<_>>()
        .len()
}

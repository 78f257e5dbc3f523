// Canonical speech names for multi-part articles

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PART_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*–\s*Part\s+\d+\s*$").expect("PART_SUFFIX regex"));

/// A single digit directly after a letter at the end of the name.
#[allow(clippy::expect_used)]
static TRAILING_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\W\d])\d$").expect("TRAILING_INDEX regex"));

/// Names ending in one of these keep their trailing digits.
const YEAR_SUFFIXES: &[&str] = &["2015", "2016"];

/// Map an article name to the name of the speech it belongs to.
///
/// `"Rally in Ohio – Part 2"` becomes `"Rally in Ohio"`, and a stray index
/// glued to the last word (`"Remarks in Iowa2"`) is dropped unless the name
/// ends in a campaign year. Applying it twice gives the same result as once.
///
/// Only a single digit directly after a letter counts as an index, so
/// `"Iowa12"` and `"Rally 12"` are left alone rather than cut to `"Iowa1"`
/// and `"Rally 1"`. Stripping any last digit would not be idempotent
/// (`"A123"` -> `"A12"` -> `"A1"`).
pub fn speech_basename(name: &str) -> String {
    let mut basename = name.trim();
    while let Some(suffix) = PART_SUFFIX.find(basename) {
        basename = basename[..suffix.start()].trim_end();
    }

    if YEAR_SUFFIXES.iter().any(|year| basename.ends_with(year)) {
        return basename.to_string();
    }

    TRAILING_INDEX.replace(basename, "$1").into_owned()
}

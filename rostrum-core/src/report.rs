// Stage summaries shown after each command

use crate::crawl::UpdateSummary;
use crate::extract::ExtractSummary;
use crate::retrieve::RetrieveSummary;
use rostrum_scanner::{CompletionReason, CrawlStatus};

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n";

pub fn describe_status(status: &CrawlStatus) -> String {
    match status {
        CrawlStatus::Completed(CompletionReason::EndOfListing) => {
            "completed (end of listing)".to_string()
        }
        CrawlStatus::Completed(CompletionReason::ReachedSeen) => {
            "completed (reached previously recorded articles)".to_string()
        }
        CrawlStatus::Completed(CompletionReason::PageLimit) => {
            "completed (page limit reached)".to_string()
        }
        CrawlStatus::Completed(CompletionReason::Revisited) => {
            "completed (pagination looped back)".to_string()
        }
        CrawlStatus::Truncated { url, error } => format!("truncated at {} ({})", url, error),
        CrawlStatus::Ambiguous { url, matches } => {
            format!("stopped at {} ({} next-page links)", url, matches)
        }
    }
}

pub fn generate_update_report(summary: &UpdateSummary) -> String {
    let mut report = String::new();
    report.push_str(DIVIDER);
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Crawl: {}\n", describe_status(&summary.status)));
    report.push_str(&format!("  New transcript URLs: {}\n", summary.new_candidates));
    report.push_str(&format!(
        "  Number of transcript URLs: {}\n",
        summary.total_candidates
    ));
    report.push_str(&format!(
        "  Number of result pages seen: {}\n",
        summary.result_pages
    ));
    report.push_str(&format!("  Pages fetched: {}\n", summary.fetch_count));
    if let Some(ref first) = summary.first_page {
        report.push_str(&format!("  First result page: {}\n", first));
    }
    if let Some(ref last) = summary.last_page {
        report.push_str(&format!("  Last result page: {}\n", last));
    }
    report
}

pub fn generate_retrieve_report(summary: &RetrieveSummary) -> String {
    let mut report = String::new();
    report.push_str(DIVIDER);
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Articles matched: {}\n", summary.selected));
    report.push_str(&format!("  Speeches matched: {}\n", summary.speeches));
    report.push_str(&format!("  New downloads: {}\n", summary.downloaded));
    if summary.failed > 0 {
        report.push_str(&format!("  Failed downloads: {}\n", summary.failed));
    }
    report.push_str(&format!("  Articles on file: {}\n", summary.total_articles));
    report
}

pub fn generate_extract_report(summary: &ExtractSummary) -> String {
    let mut report = String::new();
    report.push_str(DIVIDER);
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Articles: {}\n", summary.articles));
    if summary.missing_html > 0 {
        report.push_str(&format!(
            "  Skipped (no HTML): {}\n",
            summary.missing_html
        ));
    }
    if summary.not_transcripts > 0 {
        report.push_str(&format!(
            "  Skipped (not a transcript): {}\n",
            summary.not_transcripts
        ));
    }
    report.push_str(&format!("  Texts: {}\n", summary.texts));
    report.push_str(&format!("  Unique speeches: {}\n", summary.speeches));
    report
}

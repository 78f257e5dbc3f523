// Tests for the update and retrieve stages

use rostrum_core::crawl::{UpdateOptions, execute_update};
use rostrum_core::data::{
    CandidateListFile, ListingCacheFile, RawArticlesFile, SCHEMA_VERSION, load_json, save_json,
};
use rostrum_core::retrieve::{RetrieveOptions, execute_retrieve, parse_keywords};
use rostrum_scanner::{CandidateEntry, CompletionReason, CrawlStatus, RawArticle};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn headline(url: &str, name: &str) -> String {
    format!(r#"<h1 class="headline"><a href="{}">{}</a></h1>"#, url, name)
}

fn next_link(url: &str) -> String {
    format!(r#"<a class="next page-numbers" href="{}">Next</a>"#, url)
}

// ============================================================================
// Update Stage Tests
// ============================================================================

#[tokio::test]
async fn test_update_creates_candidate_list() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/list/",
        format!(
            "{}{}{}",
            headline(&format!("{base}/s/2/"), "Rally Transcript – Part 2"),
            headline(&format!("{base}/s/1/"), "Rally Transcript – Part 1"),
            next_link(&format!("{base}/list/page/2/"))
        ),
    )
    .await;
    mount_html(
        &server,
        "/list/page/2/",
        headline(&format!("{base}/s/0/"), "Town Hall Transcript"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let summary = execute_update(UpdateOptions::new(format!("{base}/list/"), &list_path))
        .await
        .unwrap();

    assert_eq!(summary.new_candidates, 3);
    assert_eq!(summary.total_candidates, 3);
    assert_eq!(summary.result_pages, 2);
    assert_eq!(
        summary.status,
        CrawlStatus::Completed(CompletionReason::EndOfListing)
    );

    let saved: CandidateListFile = load_json(&list_path).unwrap();
    assert_eq!(saved.version, SCHEMA_VERSION);
    assert_eq!(saved.transcripts[0].name, "Rally Transcript – Part 2");
    assert_eq!(
        saved.results,
        vec![format!("{base}/list/"), format!("{base}/list/page/2/")]
    );
}

#[tokio::test]
async fn test_update_is_incremental() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/list/",
        format!(
            "{}{}{}",
            headline(&format!("{base}/s/new/"), "Newest Speech"),
            headline(&format!("{base}/s/old/"), "Old Speech"),
            next_link(&format!("{base}/list/page/2/"))
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let existing = CandidateListFile {
        transcripts: vec![CandidateEntry::new(format!("{base}/s/old/"), "Old Speech")],
        results: vec![format!("{base}/list/page/2/")],
        ..CandidateListFile::default()
    };
    save_json(&existing, &list_path).unwrap();

    let summary = execute_update(UpdateOptions::new(format!("{base}/list/"), &list_path))
        .await
        .unwrap();

    assert_eq!(summary.new_candidates, 1);
    assert_eq!(
        summary.status,
        CrawlStatus::Completed(CompletionReason::ReachedSeen)
    );

    let saved: CandidateListFile = load_json(&list_path).unwrap();
    let urls: Vec<_> = saved.transcripts.iter().map(|t| t.url.clone()).collect();
    assert_eq!(urls, vec![format!("{base}/s/old/"), format!("{base}/s/new/")]);
    assert_eq!(
        saved.results,
        vec![format!("{base}/list/"), format!("{base}/list/page/2/")]
    );
}

#[tokio::test]
async fn test_update_from_scratch_ignores_existing_list() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/list/",
        format!(
            "{}{}",
            headline(&format!("{base}/s/new/"), "Newest Speech"),
            headline(&format!("{base}/s/old/"), "Old Speech"),
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let existing = CandidateListFile {
        transcripts: vec![CandidateEntry::new(format!("{base}/s/old/"), "Old Speech")],
        results: vec![format!("{base}/list/page/9/")],
        ..CandidateListFile::default()
    };
    save_json(&existing, &list_path).unwrap();

    let mut options = UpdateOptions::new(format!("{base}/list/"), &list_path);
    options.from_scratch = true;
    let summary = execute_update(options).await.unwrap();

    assert_eq!(summary.new_candidates, 2);
    assert_eq!(
        summary.status,
        CrawlStatus::Completed(CompletionReason::EndOfListing)
    );

    let saved: CandidateListFile = load_json(&list_path).unwrap();
    let urls: Vec<_> = saved.transcripts.iter().map(|t| t.url.clone()).collect();
    assert_eq!(urls, vec![format!("{base}/s/new/"), format!("{base}/s/old/")]);
    assert_eq!(saved.results, vec![format!("{base}/list/")]);
}

#[tokio::test]
async fn test_update_truncated_crawl_still_saves() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/list/",
        format!(
            "{}{}",
            headline(&format!("{base}/s/1/"), "First Speech"),
            next_link(&format!("{base}/list/page/2/"))
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/list/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let cache_path = dir.path().join("pages.json");
    let mut options = UpdateOptions::new(format!("{base}/list/"), &list_path);
    options.page_cache = Some(cache_path.clone());

    let summary = execute_update(options).await.unwrap();

    assert!(matches!(summary.status, CrawlStatus::Truncated { .. }));
    let saved: CandidateListFile = load_json(&list_path).unwrap();
    assert_eq!(saved.transcripts.len(), 1);
    let cache: ListingCacheFile = load_json(&cache_path).unwrap();
    assert_eq!(cache.cache.count, 1);
    assert_eq!(cache.cache.pages[0].url, format!("{base}/list/"));
}

#[tokio::test]
async fn test_update_page_limit_and_cache_resume() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/list/",
        format!(
            "{}{}",
            headline(&format!("{base}/s/1/"), "First"),
            next_link(&format!("{base}/list/page/2/"))
        ),
    )
    .await;
    mount_html(
        &server,
        "/list/page/2/",
        headline(&format!("{base}/s/2/"), "Second"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let cache_path = dir.path().join("pages.json");

    let mut options = UpdateOptions::new(format!("{base}/list/"), &list_path);
    options.page_cache = Some(cache_path.clone());
    options.page_limit = Some(1);
    let first = execute_update(options).await.unwrap();
    assert_eq!(first.fetch_count, 1);
    assert_eq!(
        first.status,
        CrawlStatus::Completed(CompletionReason::PageLimit)
    );

    // Start over from the same URL with a fresh candidate list: the first
    // page comes from the cache, only page two is fetched.
    let list_path_2 = dir.path().join("candidates-2.json");
    let mut options = UpdateOptions::new(format!("{base}/list/"), &list_path_2);
    options.page_cache = Some(cache_path.clone());
    options.page_limit = Some(1);
    let second = execute_update(options).await.unwrap();

    assert_eq!(second.fetch_count, 1);
    assert_eq!(second.new_candidates, 2);
    assert_eq!(
        second.status,
        CrawlStatus::Completed(CompletionReason::EndOfListing)
    );
    let cache: ListingCacheFile = load_json(&cache_path).unwrap();
    assert_eq!(cache.cache.count, 2);
}

#[tokio::test]
async fn test_update_strict_requires_candidate_list() {
    let dir = TempDir::new().unwrap();
    let mut options = UpdateOptions::new(
        "http://127.0.0.1:1/list/",
        dir.path().join("missing.json"),
    );
    options.strict = true;

    let err = execute_update(options).await.unwrap_err();
    assert!(err.is_missing_input());
}

// ============================================================================
// Retrieve Stage Tests
// ============================================================================

#[test]
fn test_parse_keywords() {
    assert_eq!(
        parse_keywords("Transcript, Rally,,"),
        vec!["transcript", "rally"]
    );
    assert!(parse_keywords("").is_empty());
}

#[tokio::test]
async fn test_retrieve_downloads_matching_and_skips_known() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_html(
        &server,
        "/s/1/",
        "<p>Part one.</p>".to_string(),
    )
    .await;
    mount_html(
        &server,
        "/s/2/",
        "<p>Part two.</p>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let raw_path = dir.path().join("raw.json");
    let candidates = CandidateListFile {
        transcripts: vec![
            CandidateEntry::new(format!("{base}/s/2/"), "Rally Transcript – Part 2"),
            CandidateEntry::new(format!("{base}/s/1/"), "Rally Transcript – Part 1"),
            CandidateEntry::new(format!("{base}/s/3/"), "Statement on Trade"),
            CandidateEntry::new(format!("{base}/s/0/"), "Earlier Transcript"),
        ],
        ..CandidateListFile::default()
    };
    save_json(&candidates, &list_path).unwrap();
    let existing = RawArticlesFile {
        transcripts: vec![RawArticle {
            url: format!("{base}/s/0/"),
            name: "Earlier Transcript".to_string(),
            html: Some("<p>Earlier.</p>".to_string()),
        }],
        ..RawArticlesFile::default()
    };
    save_json(&existing, &raw_path).unwrap();

    let summary = execute_retrieve(RetrieveOptions::new(
        &list_path,
        parse_keywords("transcript"),
        &raw_path,
    ))
    .await
    .unwrap();

    assert_eq!(summary.selected, 2);
    assert_eq!(summary.speeches, 1);
    assert_eq!(summary.downloaded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_articles, 3);

    let saved: RawArticlesFile = load_json(&raw_path).unwrap();
    let names: Vec<_> = saved.transcripts.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Earlier Transcript",
            "Rally Transcript – Part 2",
            "Rally Transcript – Part 1"
        ]
    );
}

#[tokio::test]
async fn test_retrieve_records_failed_download_as_null() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/s/1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("candidates.json");
    let raw_path = dir.path().join("raw.json");
    let candidates = CandidateListFile {
        transcripts: vec![CandidateEntry::new(format!("{base}/s/1/"), "Lost Transcript")],
        ..CandidateListFile::default()
    };
    save_json(&candidates, &list_path).unwrap();

    let summary = execute_retrieve(RetrieveOptions::new(&list_path, vec![], &raw_path))
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    let raw = std::fs::read_to_string(&raw_path).unwrap();
    assert!(raw.contains(r#""html":null"#));
}

#[tokio::test]
async fn test_retrieve_requires_candidate_list() {
    let dir = TempDir::new().unwrap();
    let err = execute_retrieve(RetrieveOptions::new(
        dir.path().join("missing.json"),
        vec![],
        dir.path().join("raw.json"),
    ))
    .await
    .unwrap_err();

    assert!(err.is_missing_input());
    assert!(!dir.path().join("raw.json").exists());
}

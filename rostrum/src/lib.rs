pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{EXIT_FAILURE, EXIT_MISSING_INPUT, exit_code_for, expand_path};

// Re-export stage entry points from rostrum-core
pub use rostrum_core::crawl::{UpdateOptions, UpdateSummary, execute_update};
pub use rostrum_core::extract::{ExtractOptions, ExtractSummary, execute_extract};
pub use rostrum_core::retrieve::{RetrieveOptions, RetrieveSummary, execute_retrieve};

// Crawl outcome types carried by `UpdateSummary`
pub use rostrum_scanner::{CompletionReason, CrawlStatus, ListingSelectors};

use indicatif::{ProgressBar, ProgressStyle};
use rostrum_scanner::ProgressCallback;
use std::sync::Arc;
use std::time::Duration;

/// Spinner shown while a stage runs, or `None` when progress output is off.
pub(crate) fn stage_spinner(show: bool, message: &str) -> Option<Arc<ProgressBar>> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(Arc::new(pb))
}

/// Forwards crawler and downloader progress to the spinner.
pub(crate) fn spinner_callback(spinner: &Option<Arc<ProgressBar>>) -> Option<ProgressCallback> {
    spinner.as_ref().map(|pb| {
        let pb = pb.clone();
        let callback: ProgressCallback = Arc::new(move |message: String| {
            pb.set_message(message);
            pb.tick();
        });
        callback
    })
}

pub(crate) fn finish_spinner(spinner: &Option<Arc<ProgressBar>>, message: String) {
    if let Some(pb) = spinner {
        pb.finish_with_message(message);
    }
}

//! Progress rendering for batch refreshes.
//!
//! Interactive terminals get an indicatif progress bar; everything else
//! gets one tracing line per repository.

use std::sync::Mutex;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use issuewatch::sync::{ProgressCallback, RefreshProgress};

/// Build the callback appropriate for the current stdout.
pub fn reporter() -> ProgressCallback {
    if Term::stdout().is_term() {
        interactive_reporter()
    } else {
        logging_reporter()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
        .expect("progress template is static and valid")
}

/// Progress bar created lazily on the first event, when the batch size is
/// known.
fn interactive_reporter() -> ProgressCallback {
    let slot: Mutex<Option<ProgressBar>> = Mutex::new(None);
    Box::new(move |event: RefreshProgress| {
        let mut slot = slot.lock().unwrap_or_else(|e| e.into_inner());
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new(event.total as u64);
            bar.set_style(bar_style());
            bar
        });
        bar.set_position(event.current as u64);
        bar.set_message(event.message.clone());
        if event.current + 1 == event.total {
            bar.set_position(event.total as u64);
        }
    })
}

fn logging_reporter() -> ProgressCallback {
    Box::new(|event: RefreshProgress| {
        tracing::info!(
            current = event.current + 1,
            total = event.total,
            "{}",
            event.message
        );
    })
}

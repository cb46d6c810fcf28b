//! Progress reporting for batch refreshes.

/// One progress update during a batch refresh.
///
/// `current` is zero-based and strictly increasing up to `total - 1`;
/// an update is emitted before each repository attempt.
#[derive(Debug, Clone)]
pub struct RefreshProgress {
    /// Zero-based index of the repository being attempted.
    pub current: usize,
    /// Number of repositories in this batch.
    pub total: usize,
    /// Human-readable description of the attempt.
    pub message: String,
}

/// Callback for progress updates during batch refreshes.
pub type ProgressCallback = Box<dyn Fn(RefreshProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: RefreshProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

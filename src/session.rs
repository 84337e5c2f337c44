use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::engine;
use crate::models::{AnalysisEvent, AnalysisResult, FileMetadata};

/// Fixed pause between requesting an analysis and delivering its result.
pub const ANALYSIS_DELAY: Duration = Duration::from_secs(2);

/// Handle to a scheduled analysis. Cancellation is cooperative: the timer
/// thread checks the flag after its sleep and skips delivery if set.
/// Dropping the handle does not cancel.
pub struct PendingAnalysis {
    cancelled: Arc<AtomicBool>,
    generation: u64,
}

impl PendingAnalysis {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Schedule an analysis of `metadata` after `delay`, delivering the result
/// as an [`AnalysisEvent`] tagged with `generation`. The receiver decides
/// whether the generation is still current; a cancelled timer sends
/// nothing at all.
pub fn schedule_analysis(
    metadata: FileMetadata,
    sender: Sender<AnalysisEvent>,
    delay: Duration,
    generation: u64,
) -> PendingAnalysis {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    std::thread::spawn(move || {
        std::thread::sleep(delay);
        if flag.load(Ordering::SeqCst) {
            return;
        }
        let result = engine::analyze(&metadata);
        let _ = sender.send(AnalysisEvent::Completed { generation, result });
    });
    PendingAnalysis {
        cancelled,
        generation,
    }
}

/// Current file, current result, and the in-flight analysis, owned by
/// the top-level controller.
#[derive(Default)]
pub struct Session {
    file: Option<FileMetadata>,
    result: Option<AnalysisResult>,
    pending: Option<PendingAnalysis>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&FileMetadata> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// A file is selected and no analysis is in flight.
    pub fn can_analyze(&self) -> bool {
        self.file.is_some() && self.pending.is_none()
    }

    /// Replace the current file. Any displayed result is discarded and an
    /// in-flight analysis is cancelled, so a result computed for the old
    /// file is never shown against the new one.
    pub fn select(&mut self, metadata: FileMetadata) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.result = None;
        self.file = Some(metadata);
    }

    /// Schedule the delayed analysis of the current file.
    pub fn begin_analysis(&mut self, sender: &Sender<AnalysisEvent>, delay: Duration) -> Result<()> {
        let Some(file) = self.file.clone() else {
            anyhow::bail!("no file selected");
        };
        if self.pending.is_some() {
            anyhow::bail!("an analysis is already in progress");
        }
        self.generation += 1;
        self.pending = Some(schedule_analysis(
            file,
            sender.clone(),
            delay,
            self.generation,
        ));
        Ok(())
    }

    /// Record a delivered result. Returns false (and changes nothing) when
    /// the generation does not match the pending analysis, which happens
    /// when a delivery raced with a cancellation.
    pub fn complete(&mut self, generation: u64, result: AnalysisResult) -> bool {
        match &self.pending {
            Some(pending) if pending.generation() == generation => {
                self.pending = None;
                self.result = Some(result);
                true
            }
            _ => false,
        }
    }

    /// Return to the initial empty state: no file, no result, no timer.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.file = None;
        self.result = None;
    }
}

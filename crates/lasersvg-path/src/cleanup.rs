//! Contour cleanup

use crate::command::Contour;
use serde::Serialize;
use tracing::debug;

/// A cleaned contour and how many commands were dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupReport {
    pub contour: Contour,
    pub removed: usize,
}

/// Drop every drawable command whose length is at most `threshold`.
///
/// Moves and close-paths are always kept.
pub fn remove_short_segments(contour: &Contour, threshold: f64) -> CleanupReport {
    let mut removed = 0;
    let kept: Contour = contour
        .iter()
        .enumerate()
        .filter(|(index, command)| {
            let short = command.kind().is_drawable()
                && command.length().is_some_and(|length| length <= threshold);
            if short {
                debug!(index, command = %command, "removing short segment");
                removed += 1;
            }
            !short
        })
        .map(|(_, command)| command.clone())
        .collect();

    CleanupReport {
        contour: kept,
        removed,
    }
}

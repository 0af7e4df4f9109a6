use tracing::{debug, warn};

use crate::extract::Extraction;
use crate::screen::assemble;
use crate::source::{FetchOutcome, ScreenSource};
use crate::term::MarkerSet;

/// Fetch one snapshot from `source` and extract the last completed command's output.
///
/// A failed fetch is logged and reported as `NotFound`: one bad snapshot
/// never aborts the run. Nothing is retained between calls.
pub async fn last_output(source: &dyn ScreenSource, markers: &MarkerSet) -> Extraction {
    let content = match source.fetch_screen().await {
        FetchOutcome::Content(content) => content,
        FetchOutcome::Absent => {
            debug!(source = %source.describe(), "no screen content");
            return Extraction::NotFound;
        }
        FetchOutcome::Failed(e) => {
            warn!(source = %source.describe(), error = %e, "failed to fetch screen contents");
            return Extraction::NotFound;
        }
    };

    debug!(
        source = %source.describe(),
        lines = content.number_of_lines(),
        "fetched screen"
    );

    match assemble(Some(&content)) {
        Some(buffer) => markers.extract(&buffer),
        None => Extraction::NotFound,
    }
}

//! Boundary validation: raw input in, well-formed readings out.
//!
//! The aggregator assumes every reading has a sensor and a timestamp.  This
//! is where that assumption is enforced, before readings reach it.

use tracing::warn;
use wt_core::{RawReading, Reading, WtResult};

/// Convert a batch of raw readings, dropping (and logging) the malformed.
pub fn validate_batch<I>(raw: I) -> Vec<Reading>
where
    I: IntoIterator<Item = RawReading>,
{
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, r)| match Reading::try_from(r) {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(index, error = %e, "rejected malformed reading");
                None
            }
        })
        .collect()
}

/// Parse a JSON array of raw readings and validate it.
///
/// # Errors
///
/// Only when the text is not a JSON array of objects; individual malformed
/// readings are dropped, not reported as errors.
pub fn parse_batch_json(json: &str) -> WtResult<Vec<Reading>> {
    let raw: Vec<RawReading> = serde_json::from_str(json)?;
    Ok(validate_batch(raw))
}

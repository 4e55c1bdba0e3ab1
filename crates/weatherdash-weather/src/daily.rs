//! Reduces the 3-hour forecast feed to one entry per calendar day.
//!
//! Samples are bucketed by their local calendar date. Each bucket is
//! represented by the sample whose local hour is closest to noon; on equal
//! distance the earlier sample in the input wins. Days come out in the order
//! they first appear in the input, capped at [`MAX_FORECAST_DAYS`].

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::types::{DailyForecastEntry, ForecastSample};

/// Hour of day each daily entry is chosen to be closest to
pub const NOON_HOUR: u32 = 12;

/// Longest forecast returned, in days
pub const MAX_FORECAST_DAYS: usize = 7;

/// Reduce `samples` to daily entries using the system's local time zone.
pub fn reduce_to_daily(samples: &[ForecastSample]) -> Vec<DailyForecastEntry> {
    reduce_to_daily_in(samples, &Local)
}

/// Reduce `samples` to daily entries, bucketing by calendar date in `tz`.
///
/// The input is expected in chronological order (as the forecast feed
/// delivers it) but this is not checked; output order is the order in which
/// each date is first seen. Samples whose timestamp has no calendar date are
/// skipped.
pub fn reduce_to_daily_in<Tz: TimeZone>(
    samples: &[ForecastSample],
    tz: &Tz,
) -> Vec<DailyForecastEntry> {
    let mut buckets: Vec<Vec<(u32, &ForecastSample)>> = Vec::new();
    let mut bucket_index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let Some(local) = sample.time_in(tz) else {
            tracing::debug!("Skipping forecast sample with out-of-range timestamp {}", sample.timestamp);
            continue;
        };

        let slot = *bucket_index.entry(local.date_naive()).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push((local.hour(), sample));
    }

    buckets
        .iter()
        .filter_map(|members| closest_to_noon(members))
        .take(MAX_FORECAST_DAYS)
        .cloned()
        .collect()
}

/// First member with the smallest distance from noon.
fn closest_to_noon<'a>(members: &[(u32, &'a ForecastSample)]) -> Option<&'a ForecastSample> {
    let mut iter = members.iter();
    let (first_hour, first) = iter.next()?;

    let mut best = *first;
    let mut best_diff = first_hour.abs_diff(NOON_HOUR);
    for (hour, sample) in iter {
        let diff = hour.abs_diff(NOON_HOUR);
        // Strict: an equally close later sample never replaces the current pick
        if diff < best_diff {
            best = *sample;
            best_diff = diff;
        }
    }

    Some(best)
}

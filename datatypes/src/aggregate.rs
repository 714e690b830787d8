//! Cross-capture consistency aggregation.
//!
//! Given the fingerprints observed for one label, determines the canonical
//! (dominant) fingerprint and classifies how trustworthy it is as a
//! detection signature for that label.

use crate::observation::Observation;

use std::collections::HashMap;

use hellotrace_core::Fingerprint;
use serde::Serialize;

/// Minimum dominant share for a multi-fingerprint label to still count as
/// consistent.
const MAJORITY_RATIO: f64 = 0.67;

/// How reliably a label reproduces its dominant fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConsistencyClass {
    /// Every observation produced the same fingerprint.
    Full,
    /// The dominant fingerprint covers at least 67% of observations.
    Majority,
    /// No fingerprint reaches a two-thirds share.
    Mixed,
}

/// Aggregate statistics for one label's observations.
///
/// A fresh, pure function of the observations supplied; immutable once
/// computed.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// The most frequent fingerprint. Ties go to the lexicographically
    /// smallest value, so recomputation is always deterministic.
    pub dominant: Fingerprint,
    /// Occurrences of the dominant fingerprint.
    pub dominant_count: u32,
    /// Total observations.
    pub total_count: u32,
    /// Distinct fingerprint values.
    pub distinct_count: u32,
    /// Trustworthiness classification of the dominant fingerprint.
    pub consistency_class: ConsistencyClass,
}

impl AggregateResult {
    /// Aggregates the fingerprints observed for one label.
    ///
    /// Callers must only aggregate labels that produced at least one
    /// observation; an empty slice is a caller bug and yields an all-zero
    /// result rather than a panic.
    pub fn from_fingerprints(fingerprints: &[Fingerprint]) -> AggregateResult {
        debug_assert!(
            !fingerprints.is_empty(),
            "aggregated a label with no observations"
        );
        if fingerprints.is_empty() {
            return AggregateResult {
                dominant: Fingerprint::from(""),
                dominant_count: 0,
                total_count: 0,
                distinct_count: 0,
                consistency_class: ConsistencyClass::Mixed,
            };
        }

        let mut counts: HashMap<&Fingerprint, u32> = HashMap::new();
        for fp in fingerprints {
            *counts.entry(fp).or_insert(0) += 1;
        }

        let mut dominant = &fingerprints[0];
        let mut dominant_count = counts[dominant];
        for (&fp, &count) in counts.iter() {
            if count > dominant_count || (count == dominant_count && fp < dominant) {
                dominant = fp;
                dominant_count = count;
            }
        }

        let total_count = fingerprints.len() as u32;
        let distinct_count = counts.len() as u32;
        let consistency_class = if distinct_count == 1 {
            ConsistencyClass::Full
        } else if f64::from(dominant_count) / f64::from(total_count) >= MAJORITY_RATIO {
            ConsistencyClass::Majority
        } else {
            ConsistencyClass::Mixed
        };

        AggregateResult {
            dominant: dominant.clone(),
            dominant_count,
            total_count,
            distinct_count,
            consistency_class,
        }
    }

    /// Fraction of observations matching the dominant fingerprint.
    pub fn consistency_ratio(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        f64::from(self.dominant_count) / f64::from(self.total_count)
    }
}

/// Aggregates a run's observations grouped by label.
///
/// Every label in the result had at least one observation by construction.
pub fn aggregate_by_label(observations: &[Observation]) -> HashMap<String, AggregateResult> {
    let mut by_label: HashMap<&str, Vec<Fingerprint>> = HashMap::new();
    for obs in observations {
        by_label
            .entry(&obs.label)
            .or_default()
            .push(obs.fingerprint.clone());
    }
    by_label
        .into_iter()
        .map(|(label, fps)| (label.to_string(), AggregateResult::from_fingerprints(&fps)))
        .collect()
}

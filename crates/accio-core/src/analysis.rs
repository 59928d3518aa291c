//! Cross-platform correlation of probe results into scored profile matches.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::results::{CandidateResults, ProbeResult};
use crate::scoring::{confidence, ScoringConfig};

/// One candidate handle and every platform it was found on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMatch {
    pub candidate: String,
    /// Only results with `exists == true`, in probe order.
    pub results: Vec<ProbeResult>,
    pub match_count: usize,
    /// Heuristic score in `[0, 1]`.
    pub confidence: f64,
    /// Reserved for real-name corroboration per platform; currently always empty.
    #[serde(default)]
    pub name_matches: BTreeMap<String, bool>,
}

impl ProfileMatch {
    fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.platform_name.as_str())
    }
}

/// Ranked matches plus summary counts for one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sorted by confidence descending, ties broken by candidate ascending.
    pub matches: Vec<ProfileMatch>,
    /// Number of candidates submitted, including those found nowhere.
    pub total_checked: usize,
    /// Sum of `match_count` over all matches.
    pub total_found: usize,
    /// Matches at or above the unique-profile threshold.
    pub unique_profiles: usize,
}

/// [`analyze_results_with`] using the default scoring weights.
#[must_use]
pub fn analyze_results(all_results: &[CandidateResults]) -> AnalysisResult {
    analyze_results_with(all_results, &ScoringConfig::default())
}

/// Group, score, rank and summarize per-candidate probe results.
///
/// Candidates with no found results are counted in `total_checked` but
/// produce no match.
#[must_use]
pub fn analyze_results_with(
    all_results: &[CandidateResults],
    config: &ScoringConfig,
) -> AnalysisResult {
    let mut matches: Vec<ProfileMatch> = all_results
        .iter()
        .filter_map(|entry| build_match(entry, config))
        .collect();

    matches.sort_by(rank_order);

    let total_found = matches.iter().map(|m| m.match_count).sum();
    let unique_profiles = matches
        .iter()
        .filter(|m| m.confidence >= config.unique_threshold)
        .count();

    AnalysisResult {
        matches,
        total_checked: all_results.len(),
        total_found,
        unique_profiles,
    }
}

fn build_match(entry: &CandidateResults, config: &ScoringConfig) -> Option<ProfileMatch> {
    let found: Vec<ProbeResult> = entry.results.iter().filter(|r| r.exists).cloned().collect();
    if found.is_empty() {
        return None;
    }

    Some(ProfileMatch {
        candidate: entry.candidate.clone(),
        match_count: found.len(),
        confidence: confidence(&found, config),
        results: found,
        name_matches: BTreeMap::new(),
    })
}

fn rank_order(a: &ProfileMatch, b: &ProfileMatch) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.candidate.cmp(&b.candidate))
}

/// [`find_common_profiles_with`] using the default high-value platforms.
#[must_use]
pub fn find_common_profiles(matches: &[ProfileMatch]) -> Vec<ProfileMatch> {
    find_common_profiles_with(matches, &ScoringConfig::default())
}

/// Keep matches found on at least two distinct high-value platforms.
#[must_use]
pub fn find_common_profiles_with(
    matches: &[ProfileMatch],
    config: &ScoringConfig,
) -> Vec<ProfileMatch> {
    matches
        .iter()
        .filter(|m| {
            let distinct: HashSet<&str> = m
                .platform_names()
                .filter(|name| config.is_high_value(name))
                .collect();
            distinct.len() >= 2
        })
        .cloned()
        .collect()
}

/// Keep matches found on every platform in `platforms` (case-insensitive).
///
/// An empty `platforms` list keeps everything.
#[must_use]
pub fn find_profiles_by_platforms(matches: &[ProfileMatch], platforms: &[&str]) -> Vec<ProfileMatch> {
    if platforms.is_empty() {
        return matches.to_vec();
    }

    let wanted: Vec<String> = platforms.iter().map(|p| p.to_lowercase()).collect();

    matches
        .iter()
        .filter(|m| {
            let present: HashSet<String> = m.platform_names().map(str::to_lowercase).collect();
            wanted.iter().all(|p| present.contains(p))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

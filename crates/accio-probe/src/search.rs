//! Search orchestration: generate candidates, probe every catalog platform
//! for each, and rank the results.

use std::collections::HashSet;

use accio_core::{
    analyze_results_with, load_catalog_or_builtin, load_scoring_or_default, AnalysisResult,
    CandidateResults, Catalog, NameInfo, ProbeConfig, ProbeResult, ScoringConfig, UsernameTier,
};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::client::ProbeClient;
use crate::error::ProbeError;
use crate::stats::ProbeStats;

/// Outcome of one search: the ranked analysis plus that search's counters.
#[derive(Debug, Clone, Serialize)]
pub struct Investigation {
    pub analysis: AnalysisResult,
    pub stats: ProbeStats,
}

/// Probe every distinct candidate against every catalog entry.
///
/// At most `max_concurrent` probes are in flight at once. All probes finish
/// before this returns. Output is in first-seen candidate order, and each
/// candidate's results follow catalog order. A pair whose retries run out
/// becomes a failed [`ProbeResult`] and does not affect the others.
pub async fn run_probes(
    client: &ProbeClient,
    catalog: &Catalog,
    candidates: &[String],
    max_concurrent: usize,
) -> Vec<CandidateResults> {
    let candidates = distinct_candidates(candidates);
    let entries = catalog.entries();

    let pairs = candidates.iter().enumerate().flat_map(|(ci, candidate)| {
        entries
            .iter()
            .enumerate()
            .map(move |(pi, entry)| (ci, pi, candidate.as_str(), entry))
    });

    let mut outcomes: Vec<(usize, usize, ProbeResult)> = stream::iter(pairs)
        .map(|(ci, pi, candidate, entry)| async move {
            (ci, pi, client.probe_result(candidate, entry).await)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    outcomes.sort_by_key(|(ci, pi, _)| (*ci, *pi));

    let mut grouped: Vec<Vec<ProbeResult>> = candidates
        .iter()
        .map(|_| Vec::with_capacity(entries.len()))
        .collect();
    for (ci, _, result) in outcomes {
        grouped[ci].push(result);
    }

    candidates
        .iter()
        .zip(grouped)
        .map(|(candidate, results)| CandidateResults::new(candidate, results))
        .collect()
}

/// Generate candidates for `name` at `tier`, probe them all, and rank.
///
/// Probes count into a fresh statistics session so the returned stats cover
/// this search only.
pub async fn investigate(
    client: &ProbeClient,
    catalog: &Catalog,
    scoring: &ScoringConfig,
    name: &NameInfo,
    tier: UsernameTier,
    max_concurrent: usize,
) -> Investigation {
    let session = client.new_session();
    let candidates = name.candidates(tier);

    tracing::info!(
        %tier,
        candidates = candidates.len(),
        platforms = catalog.len(),
        "starting search"
    );

    let results = run_probes(&session, catalog, &candidates, max_concurrent).await;
    let analysis = analyze_results_with(&results, scoring);
    let stats = session.stats().snapshot().await;

    tracing::info!(
        total_checked = analysis.total_checked,
        total_found = analysis.total_found,
        unique_profiles = analysis.unique_profiles,
        probes = stats.total,
        errors = stats.errors,
        elapsed_ms = stats.elapsed().num_milliseconds(),
        "search complete"
    );

    Investigation { analysis, stats }
}

/// A probe client bundled with the catalog, scoring table and fan-out bound
/// it searches with.
#[derive(Debug, Clone)]
pub struct Searcher {
    client: ProbeClient,
    catalog: Catalog,
    scoring: ScoringConfig,
    max_concurrent: usize,
}

impl Searcher {
    #[must_use]
    pub fn new(
        client: ProbeClient,
        catalog: Catalog,
        scoring: ScoringConfig,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            catalog,
            scoring,
            max_concurrent,
        }
    }

    /// Build the client and load the catalog and scoring table named by
    /// `config`, falling back to the builtin catalog and default weights.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::Http`] if the HTTP client cannot be built.
    /// - [`ProbeError::Config`] if a configured catalog or scoring file cannot
    ///   be read, parsed or validated.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = ProbeClient::new(config)?;
        let catalog = load_catalog_or_builtin(config.catalog_path.as_deref())?;
        let scoring = load_scoring_or_default(config.scoring_path.as_deref())?;
        Ok(Self::new(
            client,
            catalog,
            scoring,
            config.max_concurrent_probes,
        ))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub async fn run_probes(&self, candidates: &[String]) -> Vec<CandidateResults> {
        run_probes(&self.client, &self.catalog, candidates, self.max_concurrent).await
    }

    pub async fn investigate(&self, name: &NameInfo, tier: UsernameTier) -> Investigation {
        investigate(
            &self.client,
            &self.catalog,
            &self.scoring,
            name,
            tier,
            self.max_concurrent,
        )
        .await
    }

    /// Parse a whitespace-separated full name and investigate it.
    pub async fn investigate_name(
        &self,
        full_name: &str,
        birth_year: Option<u32>,
        tier: UsernameTier,
    ) -> Investigation {
        let mut name = NameInfo::parse(full_name);
        name.birth_year = birth_year;
        self.investigate(&name, tier).await
    }
}

fn distinct_candidates(candidates: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .cloned()
        .collect()
}

//! Integration tests for search orchestration: fan-out, regrouping and the
//! full generate → probe → analyze pipeline, all against `wiremock`.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use accio_core::{Catalog, CatalogEntry, NameInfo, ProbeConfig, ScoringConfig, UsernameTier};
use accio_probe::{investigate, run_probes, ProbeClient, Searcher};

fn test_client() -> ProbeClient {
    let config = ProbeConfig {
        timeout_secs: 5,
        max_retries: 1,
        backoff_step_ms: 0,
        ..ProbeConfig::default()
    };
    ProbeClient::new(&config).expect("failed to build test ProbeClient")
}

/// Four platforms on one mock server, distinguished by path prefix.
fn mock_catalog(server: &MockServer) -> Catalog {
    let uri = server.uri();
    Catalog::from_entries(vec![
        CatalogEntry::new("GitHub", &format!("{uri}/gh/{{}}")),
        CatalogEntry::new("GitLab", &format!("{uri}/gl/{{}}")),
        CatalogEntry::new("Reddit", &format!("{uri}/rd/{{}}")),
        CatalogEntry::new("Keybase", &format!("{uri}/kb/{{}}")),
    ])
    .expect("mock catalog should validate")
}

async fn mount_found(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn run_probes_regroups_by_candidate_in_catalog_order() {
    let server = MockServer::start().await;
    mount_found(&server, "/gh/johndoe").await;
    mount_found(&server, "/rd/johndoe").await;
    mount_found(&server, "/kb/jdoe").await;
    // Everything else falls through to wiremock's default 404.

    let client = test_client();
    let catalog = mock_catalog(&server);
    let candidates: Vec<String> = ["johndoe", "jdoe", "johndoe"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

    let results = run_probes(&client, &catalog, &candidates, 2).await;

    let order: Vec<&str> = results.iter().map(|r| r.candidate.as_str()).collect();
    assert_eq!(order, vec!["johndoe", "jdoe"], "duplicates are probed once");

    for candidate in &results {
        let platforms: Vec<&str> = candidate
            .results
            .iter()
            .map(|r| r.platform_name.as_str())
            .collect();
        assert_eq!(platforms, vec!["GitHub", "GitLab", "Reddit", "Keybase"]);
        assert!(candidate.results.iter().all(|r| r.error.is_none()));
    }

    let johndoe: Vec<bool> = results[0].results.iter().map(|r| r.exists).collect();
    assert_eq!(johndoe, vec![true, false, true, false]);
    let jdoe: Vec<bool> = results[1].results.iter().map(|r| r.exists).collect();
    assert_eq!(jdoe, vec![false, false, false, true]);
    assert_eq!(results[1].results[3].url, format!("{}/kb/jdoe", server.uri()));

    let stats = client.stats().snapshot().await;
    assert_eq!(stats.total, 8);
    assert_eq!(stats.found, 3);
    assert_eq!(stats.not_found, 5);
}

#[tokio::test]
async fn run_probes_with_concurrency_one_still_completes() {
    let server = MockServer::start().await;
    mount_found(&server, "/gl/jdoe").await;

    let client = test_client();
    let catalog = mock_catalog(&server);
    let candidates = vec!["jdoe".to_owned()];

    let results = run_probes(&client, &catalog, &candidates, 0).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].results.len(), 4);
    assert!(results[0].results[1].exists);
}

#[tokio::test]
async fn investigate_ranks_and_counts_one_search() {
    let server = MockServer::start().await;
    for prefix in ["gh", "gl", "rd", "kb"] {
        mount_found(&server, &format!("/{prefix}/johndoe")).await;
    }
    mount_found(&server, "/gh/jdoe").await;

    let client = test_client();
    let catalog = mock_catalog(&server);
    let name = NameInfo::new("John", "", "Doe", None);

    let investigation = investigate(
        &client,
        &catalog,
        &ScoringConfig::default(),
        &name,
        UsernameTier::Common,
        8,
    )
    .await;
    let analysis = &investigation.analysis;

    // john, doe, johndoe, john.doe, jdoe
    assert_eq!(analysis.total_checked, 5);
    assert_eq!(analysis.total_found, 5);
    assert_eq!(analysis.unique_profiles, 1);

    let ranked: Vec<&str> = analysis.matches.iter().map(|m| m.candidate.as_str()).collect();
    assert_eq!(ranked, vec!["johndoe", "jdoe"]);

    let top = &analysis.matches[0];
    assert_eq!(top.match_count, 4);
    // 4 hits → 0.7 base, plus the GitHub bonus.
    assert!((top.confidence - 0.8).abs() < 1e-9, "got {}", top.confidence);
    assert!((analysis.matches[1].confidence - 0.2).abs() < 1e-9);

    let stats = investigation.stats;
    assert_eq!(stats.total, 20);
    assert_eq!(stats.found, 5);
    assert_eq!(stats.not_found, 15);
    assert_eq!(stats.errors, 0);

    // The search counted into its own session, not the caller's.
    assert_eq!(client.stats().snapshot().await.total, 0);
}

#[tokio::test]
async fn investigate_with_empty_name_probes_nothing() {
    let server = MockServer::start().await;
    let client = test_client();
    let catalog = mock_catalog(&server);

    let investigation = investigate(
        &client,
        &catalog,
        &ScoringConfig::default(),
        &NameInfo::parse("   "),
        UsernameTier::Full,
        8,
    )
    .await;

    assert!(investigation.analysis.matches.is_empty());
    assert_eq!(investigation.analysis.total_checked, 0);
    assert_eq!(investigation.stats.total, 0);
}

#[tokio::test]
async fn searcher_investigates_a_full_name() {
    let server = MockServer::start().await;
    mount_found(&server, "/gl/ada").await;

    let searcher = Searcher::new(
        test_client(),
        mock_catalog(&server),
        ScoringConfig::default(),
        4,
    );

    let investigation = searcher
        .investigate_name("Ada", None, UsernameTier::Common)
        .await;

    // A lone first name yields only itself.
    assert_eq!(investigation.analysis.total_checked, 1);
    assert_eq!(investigation.analysis.matches.len(), 1);
    assert_eq!(investigation.analysis.matches[0].candidate, "ada");
    assert_eq!(investigation.stats.total, 4);
}

#[test]
fn searcher_from_config_uses_builtin_catalog_by_default() {
    let searcher = Searcher::from_config(&ProbeConfig::default()).expect("default config builds");
    assert_eq!(searcher.catalog().len(), 30);
    assert_eq!(searcher.scoring(), &ScoringConfig::default());
}

#[test]
fn searcher_from_config_reports_missing_catalog_file() {
    let config = ProbeConfig {
        catalog_path: Some("/nonexistent/accio/catalog.yaml".into()),
        ..ProbeConfig::default()
    };
    let err = Searcher::from_config(&config).expect_err("missing catalog must fail");
    assert!(
        matches!(err, accio_probe::ProbeError::Config(_)),
        "expected Config error, got: {err:?}"
    );
}

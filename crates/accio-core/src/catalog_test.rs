use super::*;

fn github_correction() -> ExistenceCorrection {
    ExistenceCorrection::ResolvedUrlContains {
        marker: "404".to_owned(),
    }
}

#[test]
fn builtin_catalog_is_valid() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.len(), 30);
    validate_catalog(&catalog).expect("builtin catalog must validate");
    for entry in catalog.entries() {
        assert_eq!(entry.check_method, "GET");
        assert!(entry.url_template.contains(PLACEHOLDER));
    }
}

#[test]
fn builtin_catalog_only_corrects_github() {
    let catalog = Catalog::builtin();
    let corrected: Vec<&str> = catalog
        .entries()
        .iter()
        .filter(|e| e.correction.is_some())
        .map(|e| e.platform_name.as_str())
        .collect();
    assert_eq!(corrected, vec!["GitHub"]);
    assert_eq!(
        catalog.find("GitHub").and_then(|e| e.correction.clone()),
        Some(github_correction())
    );
}

#[test]
fn find_is_exact_match() {
    let catalog = Catalog::builtin();
    assert!(catalog.find("GitHub").is_some());
    assert!(catalog.find("github").is_none());
    assert!(catalog.find("NonExistentSite").is_none());
}

#[test]
fn profile_url_substitutes_placeholder() {
    let entry = CatalogEntry::new("Deviantart", "https://{}.deviantart.com");
    assert_eq!(
        entry.profile_url("johndoe"),
        "https://johndoe.deviantart.com"
    );
}

#[test]
fn resolved_url_marker_forces_not_found() {
    let entry = CatalogEntry::new("GitHub", "https://github.com/{}").with_correction(github_correction());
    assert!(!entry.refine_existence("johndoe", "https://github.com/404", true));
    assert!(entry.refine_existence("johndoe", "https://github.com/johndoe", true));
}

#[test]
fn corrections_never_upgrade_not_found() {
    let correction = github_correction();
    assert!(!correction.refine("johndoe", "https://github.com/johndoe", false));
    assert!(!ExistenceCorrection::RedirectedAwayFromHandle.refine(
        "johndoe",
        "https://example.com/johndoe",
        false
    ));
}

#[test]
fn redirect_away_from_handle_is_case_insensitive() {
    let correction = ExistenceCorrection::RedirectedAwayFromHandle;
    assert!(correction.refine("JohnDoe", "https://www.instagram.com/johndoe/", true));
    assert!(!correction.refine(
        "johndoe",
        "https://www.instagram.com/accounts/login/",
        true
    ));
}

#[test]
fn redirect_away_from_handle_matches_percent_encoded_handles() {
    let correction = ExistenceCorrection::RedirectedAwayFromHandle;
    assert!(correction.refine("josé", "https://www.instagram.com/jos%C3%A9/", true));
    assert!(correction.refine("JOSÉ", "https://www.instagram.com/jos%C3%A9/", true));
    assert!(!correction.refine(
        "josé",
        "https://www.instagram.com/accounts/login/?next=%2Fjose%2F",
        true
    ));
}

#[test]
fn entry_without_correction_passes_verdict_through() {
    let entry = CatalogEntry::new("Reddit", "https://www.reddit.com/user/{}");
    assert!(entry.refine_existence("x", "https://www.reddit.com/404", true));
    assert!(!entry.refine_existence("x", "https://www.reddit.com/user/x", false));
}

#[test]
fn validate_rejects_missing_placeholder() {
    let err = Catalog::from_entries(vec![CatalogEntry::new("Broken", "https://example.com/")])
        .unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("exactly one")),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_rejects_two_placeholders() {
    let err = Catalog::from_entries(vec![CatalogEntry::new(
        "Broken",
        "https://{}.example.com/{}",
    )])
    .unwrap_err();
    assert!(err.to_string().contains("found 2"), "unexpected error: {err}");
}

#[test]
fn validate_rejects_duplicate_platform_case_insensitively() {
    let err = Catalog::from_entries(vec![
        CatalogEntry::new("GitHub", "https://github.com/{}"),
        CatalogEntry::new("github", "https://github.com/{}"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate platform name"));
}

#[test]
fn validate_rejects_empty_name() {
    let err = Catalog::from_entries(vec![CatalogEntry::new("  ", "https://example.com/{}")])
        .unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_unsupported_method() {
    let err = Catalog::from_entries(vec![
        CatalogEntry::new("Poster", "https://example.com/{}").with_method("POST")
    ])
    .unwrap_err();
    assert!(err.to_string().contains("unsupported check_method"));
}

#[test]
fn validate_accepts_lowercase_head() {
    let catalog = Catalog::from_entries(vec![
        CatalogEntry::new("Keybase", "https://keybase.io/{}").with_method("head")
    ]);
    assert!(catalog.is_ok(), "expected Ok, got: {catalog:?}");
}

#[test]
fn validate_rejects_empty_marker() {
    let err = Catalog::from_entries(vec![CatalogEntry::new(
        "GitHub",
        "https://github.com/{}",
    )
    .with_correction(ExistenceCorrection::ResolvedUrlContains {
        marker: String::new(),
    })])
    .unwrap_err();
    assert!(err.to_string().contains("empty resolved_url_contains marker"));
}

#[test]
fn catalog_parses_yaml_with_defaults_and_corrections() {
    let yaml = r#"
platforms:
  - platform_name: GitHub
    url_template: "https://github.com/{}"
    correction:
      kind: resolved_url_contains
      marker: "404"
  - platform_name: Instagram
    url_template: "https://www.instagram.com/{}"
    check_method: HEAD
    correction:
      kind: redirected_away_from_handle
"#;
    let catalog: Catalog = serde_yaml::from_str(yaml).expect("parse");
    let github = catalog.find("GitHub").expect("GitHub entry");
    assert_eq!(github.check_method, "GET");
    assert_eq!(github.correction, Some(github_correction()));
    let instagram = catalog.find("Instagram").expect("Instagram entry");
    assert_eq!(instagram.check_method, "HEAD");
    assert_eq!(
        instagram.correction,
        Some(ExistenceCorrection::RedirectedAwayFromHandle)
    );
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("catalog.yaml");
    let catalog = load_catalog(&path).expect("failed to load catalog.yaml");
    assert!(!catalog.is_empty());
    assert!(catalog.find("GitHub").is_some());
}

#[test]
fn load_catalog_reports_missing_file() {
    let err = load_catalog(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}

#[test]
fn load_catalog_or_builtin_without_path_uses_builtin() {
    let catalog = load_catalog_or_builtin(None).unwrap();
    assert_eq!(catalog, Catalog::builtin());
}

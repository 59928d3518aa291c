//! Probe targets: which platforms to check and how to build their profile URLs.

use std::collections::HashSet;
use std::path::Path;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Substitution placeholder for the candidate handle in a URL template.
pub const PLACEHOLDER: &str = "{}";

const SUPPORTED_METHODS: &[&str] = &["GET", "HEAD"];

/// Builtin platforms as `(name, url template)`, all probed with `GET`.
const BUILTIN_PLATFORMS: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/{}"),
    ("Twitter", "https://twitter.com/{}"),
    ("Instagram", "https://www.instagram.com/{}"),
    ("Facebook", "https://www.facebook.com/{}"),
    ("YouTube", "https://www.youtube.com/{}"),
    ("Pinterest", "https://www.pinterest.com/{}"),
    ("Reddit", "https://www.reddit.com/user/{}"),
    ("Twitch", "https://www.twitch.tv/{}"),
    ("Medium", "https://medium.com/@{}"),
    ("Quora", "https://www.quora.com/profile/{}"),
    ("Flickr", "https://www.flickr.com/people/{}"),
    ("Steam", "https://steamcommunity.com/id/{}"),
    ("Vimeo", "https://vimeo.com/{}"),
    ("SoundCloud", "https://soundcloud.com/{}"),
    ("Disqus", "https://disqus.com/by/{}"),
    ("Hackernews", "https://news.ycombinator.com/user?id={}"),
    ("Deviantart", "https://{}.deviantart.com"),
    ("Patreon", "https://www.patreon.com/{}"),
    ("BitBucket", "https://bitbucket.org/{}"),
    ("GitLab", "https://gitlab.com/{}"),
    ("Spotify", "https://open.spotify.com/user/{}"),
    ("Behance", "https://www.behance.net/{}"),
    ("Goodreads", "https://www.goodreads.com/{}"),
    ("Instructables", "https://www.instructables.com/member/{}"),
    ("Keybase", "https://keybase.io/{}"),
    ("Kongregate", "https://www.kongregate.com/accounts/{}"),
    ("Livejournal", "https://{}.livejournal.com"),
    ("AngelList", "https://angel.co/{}"),
    ("Last.fm", "https://www.last.fm/user/{}"),
    ("Dribbble", "https://dribbble.com/{}"),
];

/// Post-response refinement for platforms whose 2xx status is not proof
/// that the profile exists.
///
/// A correction can only downgrade "exists" to "not found", never the
/// reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExistenceCorrection {
    /// The platform redirects missing profiles to a generic page whose
    /// final URL contains `marker`.
    ResolvedUrlContains { marker: String },
    /// The platform redirects missing profiles somewhere that no longer
    /// mentions the handle (login walls, home page).
    RedirectedAwayFromHandle,
}

impl ExistenceCorrection {
    /// Apply the correction to a status-based verdict.
    ///
    /// `resolved_url` is the final request URL after redirects, as the HTTP
    /// client reports it (percent-encoded). It is decoded before the handle
    /// is looked for, so non-ASCII handles compare as typed.
    #[must_use]
    pub fn refine(&self, candidate: &str, resolved_url: &str, exists: bool) -> bool {
        if !exists {
            return false;
        }
        match self {
            Self::ResolvedUrlContains { marker } => !resolved_url.contains(marker.as_str()),
            Self::RedirectedAwayFromHandle => percent_decode_str(resolved_url)
                .decode_utf8_lossy()
                .to_lowercase()
                .contains(&candidate.to_lowercase()),
        }
    }
}

fn default_check_method() -> String {
    "GET".to_owned()
}

/// One platform to probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub platform_name: String,
    /// Profile URL with exactly one [`PLACEHOLDER`] for the handle.
    pub url_template: String,
    #[serde(default = "default_check_method")]
    pub check_method: String,
    #[serde(default)]
    pub correction: Option<ExistenceCorrection>,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(platform_name: &str, url_template: &str) -> Self {
        Self {
            platform_name: platform_name.to_owned(),
            url_template: url_template.to_owned(),
            check_method: default_check_method(),
            correction: None,
        }
    }

    #[must_use]
    pub fn with_correction(mut self, correction: ExistenceCorrection) -> Self {
        self.correction = Some(correction);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.check_method = method.to_owned();
        self
    }

    /// Substitute `candidate` into the URL template.
    #[must_use]
    pub fn profile_url(&self, candidate: &str) -> String {
        self.url_template.replace(PLACEHOLDER, candidate)
    }

    /// Status-based verdict refined by this entry's correction, if any.
    #[must_use]
    pub fn refine_existence(&self, candidate: &str, resolved_url: &str, exists: bool) -> bool {
        match &self.correction {
            Some(correction) => correction.refine(candidate, resolved_url, exists),
            None => exists,
        }
    }
}

/// Ordered, validated list of probe targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    platforms: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any entry is malformed or two
    /// entries share a platform name.
    pub fn from_entries(platforms: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        let catalog = Self { platforms };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// The default platform table. GitHub serves a 2xx "404" page for
    /// missing users, so its entry carries a resolved-URL correction.
    #[must_use]
    pub fn builtin() -> Self {
        let platforms = BUILTIN_PLATFORMS
            .iter()
            .map(|&(name, template)| {
                let entry = CatalogEntry::new(name, template);
                if name == "GitHub" {
                    entry.with_correction(ExistenceCorrection::ResolvedUrlContains {
                        marker: "404".to_owned(),
                    })
                } else {
                    entry
                }
            })
            .collect();
        Self { platforms }
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.platforms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Look up an entry by exact platform name.
    #[must_use]
    pub fn find(&self, platform_name: &str) -> Option<&CatalogEntry> {
        self.platforms
            .iter()
            .find(|p| p.platform_name == platform_name)
    }
}

/// Load and validate a catalog from a YAML file with a top-level
/// `platforms:` list.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// Load the catalog at `path`, or fall back to [`Catalog::builtin`].
///
/// # Errors
///
/// Propagates [`load_catalog`] errors when a path is given.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> Result<Catalog, ConfigError> {
    match path {
        Some(p) => load_catalog(p),
        None => Ok(Catalog::builtin()),
    }
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for entry in &catalog.platforms {
        let name = entry.platform_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "platform name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate platform name: '{}'",
                entry.platform_name
            )));
        }

        let placeholders = entry.url_template.matches(PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(ConfigError::Validation(format!(
                "platform '{}' url_template must contain exactly one '{PLACEHOLDER}', found {placeholders}",
                entry.platform_name
            )));
        }

        if !SUPPORTED_METHODS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(&entry.check_method))
        {
            return Err(ConfigError::Validation(format!(
                "platform '{}' has unsupported check_method '{}'; must be GET or HEAD",
                entry.platform_name, entry.check_method
            )));
        }

        if let Some(ExistenceCorrection::ResolvedUrlContains { marker }) = &entry.correction {
            if marker.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "platform '{}' has an empty resolved_url_contains marker",
                    entry.platform_name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

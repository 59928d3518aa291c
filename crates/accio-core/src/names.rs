//! Candidate handle synthesis from a person's name.
//!
//! Three tiers trade breadth for probe volume:
//!
//! | Tier       | Seeds                                   | Year expansion          |
//! |------------|-----------------------------------------|-------------------------|
//! | `Common`   | first, last, joined forms, initial+last | first name only, 2 forms |
//! | `Full`     | common seeds + `_` join + middle initial | every seed, 4 forms     |
//! | `Advanced` | `Full` + leetspeak, reversed, affixes   | inherited from `Full`   |
//!
//! All generators are total: an empty first name yields an empty list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Prefixes people commonly bolt onto a name when the plain handle is taken.
const COMMON_AFFIXES: &[&str] = &["the", "real", "official", "its", "im", "mr", "ms", "dr"];

/// How aggressively to expand a name into candidate handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsernameTier {
    Common,
    #[default]
    Full,
    Advanced,
}

impl std::fmt::Display for UsernameTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsernameTier::Common => write!(f, "common"),
            UsernameTier::Full => write!(f, "full"),
            UsernameTier::Advanced => write!(f, "advanced"),
        }
    }
}

/// The parts of a person's name that handle generation works from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInfo {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Optional birth year; `None` and `Some(0)` both mean "unknown".
    pub birth_year: Option<u32>,
}

impl NameInfo {
    #[must_use]
    pub fn new(
        first_name: &str,
        middle_name: &str,
        last_name: &str,
        birth_year: Option<u32>,
    ) -> Self {
        Self {
            first_name: first_name.to_owned(),
            middle_name: middle_name.to_owned(),
            last_name: last_name.to_owned(),
            birth_year,
        }
    }

    /// Split a free-form full name on whitespace.
    ///
    /// One token is a first name, two are first + last, and three or more
    /// put every interior token (space-joined) into the middle name.
    #[must_use]
    pub fn parse(full_name: &str) -> Self {
        let parts: Vec<&str> = full_name.split_whitespace().collect();
        match parts.as_slice() {
            [] => Self::default(),
            [first] => Self::new(first, "", "", None),
            [first, last] => Self::new(first, "", last, None),
            [first, middle @ .., last] => Self::new(first, &middle.join(" "), last, None),
        }
    }

    #[must_use]
    pub fn with_birth_year(mut self, birth_year: u32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    /// Dispatch to the generator for `tier`.
    #[must_use]
    pub fn candidates(&self, tier: UsernameTier) -> Vec<String> {
        match tier {
            UsernameTier::Common => self.generate_common_usernames(),
            UsernameTier::Full => self.generate_usernames(),
            UsernameTier::Advanced => self.generate_advanced_usernames(),
        }
    }

    /// Full tier: every seed form, each expanded with four birth-year suffixes.
    #[must_use]
    pub fn generate_usernames(&self) -> Vec<String> {
        if self.first_name.is_empty() {
            return Vec::new();
        }

        let first = &self.first_name;
        let last = &self.last_name;
        let mut variations = vec![first.to_lowercase()];

        if !last.is_empty() {
            let initial = first_char(first).unwrap_or_default();
            variations.extend(
                [
                    last.clone(),
                    format!("{first}{last}"),
                    format!("{first}.{last}"),
                    format!("{first}_{last}"),
                    format!("{initial}{last}"),
                ]
                .iter()
                .map(|v| v.to_lowercase()),
            );
        }

        if let Some(mi) = first_char(&self.middle_name) {
            variations.extend(
                [
                    format!("{first}{mi}{last}"),
                    format!("{first}.{mi}.{last}"),
                    format!("{first}_{mi}_{last}"),
                ]
                .iter()
                .map(|v| v.to_lowercase()),
            );
        }

        // Expansion runs over the pre-year set only; year forms are not
        // themselves re-suffixed.
        if let Some((full, short)) = self.year_suffixes() {
            let with_years: Vec<String> = variations
                .iter()
                .flat_map(|v| {
                    [
                        format!("{v}{full}"),
                        format!("{v}{short}"),
                        format!("{v}_{full}"),
                        format!("{v}_{short}"),
                    ]
                })
                .collect();
            variations.extend(with_years);
        }

        dedup_preserving_order(variations)
    }

    /// Cheap tier for quick searches. Only the bare first name gets a year.
    #[must_use]
    pub fn generate_common_usernames(&self) -> Vec<String> {
        if self.first_name.is_empty() {
            return Vec::new();
        }

        let first = self.first_name.to_lowercase();
        let mut variations = vec![first.clone()];

        if !self.last_name.is_empty() {
            let last = self.last_name.to_lowercase();
            let initial = first_char(&first).unwrap_or_default();
            variations.extend([
                last.clone(),
                format!("{first}{last}"),
                format!("{first}.{last}"),
                format!("{initial}{last}"),
            ]);
        }

        if let Some((full, short)) = self.year_suffixes() {
            variations.extend([format!("{first}{full}"), format!("{first}{short}")]);
        }

        dedup_preserving_order(variations)
    }

    /// Exploratory tier: the full tier followed by leetspeak, reversed-name
    /// and affixed forms.
    ///
    /// The extra forms are deduplicated among themselves but not against the
    /// full tier, so a handle both halves produce appears twice.
    #[must_use]
    pub fn generate_advanced_usernames(&self) -> Vec<String> {
        let mut basic = self.generate_usernames();
        let first = &self.first_name;
        let last = &self.last_name;

        let mut advanced: Vec<String> = basic.iter().map(|u| to_leetspeak(u)).collect();

        if !last.is_empty() {
            advanced.extend(
                [
                    format!("{last}{first}"),
                    format!("{last}.{first}"),
                    format!("{last}_{first}"),
                ]
                .iter()
                .map(|v| v.to_lowercase()),
            );
        }

        for affix in COMMON_AFFIXES {
            if !first.is_empty() {
                advanced.push(format!("{affix}{first}").to_lowercase());
                advanced.push(format!("{affix}_{first}").to_lowercase());
            }
            if !last.is_empty() {
                advanced.push(format!("{affix}{last}").to_lowercase());
                advanced.push(format!("{affix}_{last}").to_lowercase());
            }
        }

        basic.extend(dedup_preserving_order(advanced));
        basic
    }

    /// Full and two-digit forms of the birth year, if one is known.
    fn year_suffixes(&self) -> Option<(String, String)> {
        let year = self.birth_year.filter(|&y| y > 0)?.to_string();
        let short = year[year.len().saturating_sub(2)..].to_owned();
        Some((year, short))
    }
}

/// Replace a, e, i, o, s, t (either case) with 4, 3, 1, 0, 5, 7.
///
/// Every other character, including its case, passes through unchanged.
#[must_use]
pub fn to_leetspeak(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a' | 'A' => '4',
            'e' | 'E' => '3',
            'i' | 'I' => '1',
            'o' | 'O' => '0',
            's' | 'S' => '5',
            't' | 'T' => '7',
            other => other,
        })
        .collect()
}

fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;

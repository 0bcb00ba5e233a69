//! Public/private domain classification.
//!
//! Well-known consumer webmail providers run catch-all and anti-abuse
//! policies that make SMTP probing unreliable, so the pipeline can skip deep
//! verification for them. The set is injected at construction time; the
//! default seeds the usual suspects.

use std::collections::HashSet;

/// Major free webmail providers, compared case-insensitively.
pub const DEFAULT_PUBLIC_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "live.com",
    "msn.com",
    "protonmail.com",
];

#[derive(Debug, Clone)]
pub struct DomainClassifier {
    public_domains: HashSet<String>,
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_DOMAINS.iter().copied())
    }
}

impl DomainClassifier {
    /// Builds a classifier over the given public-domain set. Entries are
    /// lowercased once here so lookups stay allocation-light.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public_domains: domains
                .into_iter()
                .map(|domain| domain.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_public(&self, domain: &str) -> bool {
        self.public_domains.contains(&domain.to_ascii_lowercase())
    }

    /// "Private/corporate" is simply anything not in the public set.
    pub fn is_private(&self, domain: &str) -> bool {
        !self.is_public(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_contains_major_providers() {
        let classifier = DomainClassifier::default();
        assert!(classifier.is_public("gmail.com"));
        assert!(classifier.is_public("protonmail.com"));
        assert!(classifier.is_private("corp.example"));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let classifier = DomainClassifier::default();
        assert!(classifier.is_public("GMail.COM"));
    }

    #[test]
    fn custom_set_replaces_default() {
        let classifier = DomainClassifier::new(["Webmail.Example"]);
        assert!(classifier.is_public("webmail.example"));
        assert!(classifier.is_private("gmail.com"));
    }
}

//! The single-address verification pipeline.
//!
//! [`Verifier::verify`] chains format check → domain classification → MX
//! resolution → SMTP probe. Each stage is a strict gate: the first failure
//! yields `NOT ACTIVE` and nothing later runs. The function is total — every
//! input produces a verdict, never an error.

use std::fmt;
use std::time::Duration;

use crate::classifier::DomainClassifier;
use crate::format::is_valid_format;
use crate::mx::{self, MxRecord, MxStatus};
use crate::probe::{ProbeOptions, SmtpProber};

/// Binary deliverability verdict. All failure modes fold into
/// [`Verdict::NotActive`] — fail-closed, by policy, because mail servers give
/// ambiguous signals and an "unknown" state would just push the ambiguity to
/// the caller.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    #[cfg_attr(feature = "with-serde", serde(rename = "ACTIVE"))]
    Active,
    #[cfg_attr(feature = "with-serde", serde(rename = "NOT ACTIVE"))]
    NotActive,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::NotActive => "NOT ACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of output: the trimmed input address and its verdict.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub email: String,
    pub status: Verdict,
}

/// Configuration surface of the pipeline.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// When set, addresses on well-known public consumer domains are marked
    /// NOT ACTIVE without probing (their servers answer unreliably).
    pub classify_domains: bool,
    /// Lifetime of the MX query.
    pub dns_timeout: Duration,
    pub probe: ProbeOptions,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            classify_domains: true,
            dns_timeout: mx::DEFAULT_DNS_TIMEOUT,
            probe: ProbeOptions::default(),
        }
    }
}

pub(crate) trait MxLookup {
    fn resolve(&self, domain: &str, timeout: Duration) -> Result<MxStatus, mx::Error>;
}

pub(crate) trait MailboxProbe {
    fn probe(&self, address: &str, records: &[MxRecord]) -> Verdict;
}

/// System-resolver implementation used outside of tests.
pub(crate) struct SystemResolver;

impl MxLookup for SystemResolver {
    fn resolve(&self, domain: &str, timeout: Duration) -> Result<MxStatus, mx::Error> {
        mx::resolve_mx(domain, timeout)
    }
}

impl MailboxProbe for SmtpProber {
    fn probe(&self, address: &str, records: &[MxRecord]) -> Verdict {
        if SmtpProber::probe(self, address, records).accepted {
            Verdict::Active
        } else {
            Verdict::NotActive
        }
    }
}

/// Composes format check, domain classification, MX resolution and the SMTP
/// probe into a verdict function.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    options: VerifyOptions,
    classifier: DomainClassifier,
}

impl Verifier {
    pub fn new(options: VerifyOptions) -> Self {
        Self {
            options,
            classifier: DomainClassifier::default(),
        }
    }

    /// Replace the default public-domain set (fixtures, custom policies).
    pub fn with_classifier(options: VerifyOptions, classifier: DomainClassifier) -> Self {
        Self {
            options,
            classifier,
        }
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Single-address verdict. Never fails: every error path folds into
    /// `NOT ACTIVE`.
    pub fn verify(&self, raw: &str) -> VerificationResult {
        let prober = SmtpProber::new(self.options.probe.clone());
        self.verify_with(&SystemResolver, &prober, raw)
    }

    pub(crate) fn verify_with<R, P>(
        &self,
        resolver: &R,
        prober: &P,
        raw: &str,
    ) -> VerificationResult
    where
        R: MxLookup,
        P: MailboxProbe,
    {
        let email = raw.trim();
        let not_active = || VerificationResult {
            email: email.to_string(),
            status: Verdict::NotActive,
        };

        if !is_valid_format(email) {
            return not_active();
        }
        let Some((_, domain)) = email.split_once('@') else {
            return not_active();
        };
        if self.options.classify_domains && self.classifier.is_public(domain) {
            return not_active();
        }
        let status = match resolver.resolve(domain, self.options.dns_timeout) {
            Ok(status) => status,
            Err(_err) => {
                #[cfg(feature = "with-tracing")]
                tracing::debug!(%domain, error = %_err, "MX resolution failed");
                return not_active();
            }
        };
        let MxStatus::Records(records) = status else {
            return not_active();
        };

        VerificationResult {
            email: email.to_string(),
            status: prober.probe(email, &records),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;

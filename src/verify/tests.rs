use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{MailboxProbe, MxLookup, Verdict, Verifier, VerifyOptions};
use crate::classifier::DomainClassifier;
use crate::mx::{self, MxRecord, MxStatus};

type ResolveFn = dyn Fn(&str) -> Result<MxStatus, mx::Error> + Send + Sync;
type ProbeFn = dyn Fn(&str, &[MxRecord]) -> Verdict + Send + Sync;

pub(crate) struct StubLookup {
    pub on_resolve: Box<ResolveFn>,
    pub calls: AtomicUsize,
}

impl StubLookup {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<MxStatus, mx::Error> + Send + Sync + 'static,
    {
        Self {
            on_resolve: Box::new(f),
            calls: AtomicUsize::new(0),
        }
    }
}

impl MxLookup for StubLookup {
    fn resolve(&self, domain: &str, _timeout: Duration) -> Result<MxStatus, mx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.on_resolve)(domain)
    }
}

pub(crate) struct StubProbe {
    pub on_probe: Box<ProbeFn>,
    pub calls: AtomicUsize,
}

impl StubProbe {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &[MxRecord]) -> Verdict + Send + Sync + 'static,
    {
        Self {
            on_probe: Box::new(f),
            calls: AtomicUsize::new(0),
        }
    }
}

impl MailboxProbe for StubProbe {
    fn probe(&self, address: &str, records: &[MxRecord]) -> Verdict {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.on_probe)(address, records)
    }
}

pub(crate) fn corp_records() -> Vec<MxRecord> {
    vec![
        MxRecord::new(10, "mx1.corp.example"),
        MxRecord::new(20, "mx2.corp.example"),
    ]
}

fn always_records() -> StubLookup {
    StubLookup::new(|_| Ok(MxStatus::Records(corp_records())))
}

fn always_active() -> StubProbe {
    StubProbe::new(|_, _| Verdict::Active)
}

#[test]
fn malformed_address_short_circuits_before_any_network() {
    let verifier = Verifier::default();
    let resolver = always_records();
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "not-an-email");
    assert_eq!(result.status, Verdict::NotActive);
    assert_eq!(result.email, "not-an-email");
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn public_domain_is_not_probed_when_classification_is_on() {
    let verifier = Verifier::default();
    let resolver = always_records();
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "someone@gmail.com");
    assert_eq!(result.status, Verdict::NotActive);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn public_domain_is_probed_when_classification_is_off() {
    let verifier = Verifier::new(VerifyOptions {
        classify_domains: false,
        ..VerifyOptions::default()
    });
    let resolver = always_records();
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "someone@gmail.com");
    assert_eq!(result.status, Verdict::Active);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn injected_classifier_replaces_default_set() {
    let verifier = Verifier::with_classifier(
        VerifyOptions::default(),
        DomainClassifier::new(["corp.example"]),
    );
    let resolver = always_records();
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "user@corp.example");
    assert_eq!(result.status, Verdict::NotActive);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_mx_records_fold_to_not_active() {
    let verifier = Verifier::default();
    let resolver = StubLookup::new(|_| Ok(MxStatus::NoRecords));
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "user@no-mail.example");
    assert_eq!(result.status, Verdict::NotActive);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn resolution_failure_folds_to_not_active() {
    let verifier = Verifier::default();
    let resolver = StubLookup::new(|_| Err(mx::Error::EmptyDomain));
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "user@corp.example");
    assert_eq!(result.status, Verdict::NotActive);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn probe_verdict_passes_through_with_sorted_records() {
    let verifier = Verifier::default();
    let resolver = always_records();
    let prober = StubProbe::new(|address, records| {
        assert_eq!(address, "user@corp.example");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].exchange, "mx1.corp.example");
        Verdict::Active
    });

    let result = verifier.verify_with(&resolver, &prober, "user@corp.example");
    assert_eq!(result.status, Verdict::Active);
}

#[test]
fn result_email_is_the_trimmed_input() {
    let verifier = Verifier::default();
    let resolver = always_records();
    let prober = always_active();

    let result = verifier.verify_with(&resolver, &prober, "  user@corp.example \n");
    assert_eq!(result.email, "user@corp.example");
    assert_eq!(result.status, Verdict::Active);
}

#[test]
fn verify_is_idempotent_under_fixed_infrastructure() {
    let verifier = Verifier::default();
    let resolver = always_records();
    let prober = StubProbe::new(|_, _| Verdict::NotActive);

    let first = verifier.verify_with(&resolver, &prober, "user@corp.example");
    let second = verifier.verify_with(&resolver, &prober, "user@corp.example");
    assert_eq!(first, second);
}

#[test]
fn verdict_strings_match_the_report_contract() {
    assert_eq!(Verdict::Active.as_str(), "ACTIVE");
    assert_eq!(Verdict::NotActive.to_string(), "NOT ACTIVE");
}

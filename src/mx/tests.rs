use super::{MxRecord, MxStatus, resolver};
use trust_dns_resolver::error::ResolveError;

type LookupResult = Result<Vec<MxRecord>, ResolveError>;
type LookupFn = dyn Fn(&str) -> LookupResult;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("blank domain should fail");
    assert!(matches!(err, super::Error::EmptyDomain));
}

#[test]
fn resolve_with_sorts_ascending_by_preference() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "corp.example");
        Ok(vec![
            MxRecord::new(30, "backup.corp.example"),
            MxRecord::new(10, "mx1.corp.example"),
            MxRecord::new(20, "mx2.corp.example"),
        ])
    });

    let status = resolver::resolve_with(&stub, "corp.example").expect("lookup succeeds");
    let records = status.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].exchange, "mx1.corp.example");
    assert_eq!(records[1].exchange, "mx2.corp.example");
    assert_eq!(records[2].exchange, "backup.corp.example");
}

#[test]
fn resolve_with_keeps_resolver_order_on_ties() {
    let stub = StubResolver::new(|_| {
        Ok(vec![
            MxRecord::new(10, "first.corp.example"),
            MxRecord::new(10, "second.corp.example"),
            MxRecord::new(5, "preferred.corp.example"),
        ])
    });

    let status = resolver::resolve_with(&stub, "corp.example").expect("lookup succeeds");
    let records = status.records();
    assert_eq!(records[0].exchange, "preferred.corp.example");
    // ties are not re-sorted
    assert_eq!(records[1].exchange, "first.corp.example");
    assert_eq!(records[2].exchange, "second.corp.example");
}

#[test]
fn resolve_with_handles_no_records() {
    let stub = StubResolver::new(|_| Ok(Vec::new()));

    let status = resolver::resolve_with(&stub, "corp.example").expect("lookup succeeds");
    assert!(matches!(status, MxStatus::NoRecords));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.CORP.example.");
    assert_eq!(out, "mail.corp.example");
}

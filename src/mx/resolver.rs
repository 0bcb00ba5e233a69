use std::time::Duration;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    system_conf::read_system_conf,
};

use super::{Error, MxRecord, MxStatus};

/// Lifetime of a single MX query when the caller does not override it.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(10);

/// Lookup MX records for `domain` using the system resolver.
///
/// The domain is normalized via IDNA before querying DNS. An NXDOMAIN or an
/// empty answer yields [`MxStatus::NoRecords`]; transport-level failures
/// (timeouts included) surface as [`Error::Query`].
pub fn resolve_mx(domain: &str, timeout: Duration) -> Result<MxStatus, Error> {
    let ascii = normalize_domain(domain)?;
    let resolver = build_resolver(timeout)?;
    resolve_with(&resolver, &ascii)
}

fn build_resolver(timeout: Duration) -> Result<Resolver, Error> {
    let (config, mut options) = read_system_conf().map_err(Error::config)?;
    options.timeout = timeout;
    Resolver::new(config, options).map_err(Error::config)
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx,
{
    let mut records = resolver.lookup_mx(ascii_domain).map_err(Error::query)?;

    // stable sort: equal preferences keep the resolver's order
    records.sort_by_key(|record| record.preference);

    #[cfg(feature = "with-tracing")]
    tracing::debug!(domain = %ascii_domain, count = records.len(), "MX lookup");

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            // an absent RRset is an answer, not a transport failure
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => return Ok(Vec::new()),
                _ => return Err(err),
            },
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(&mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}

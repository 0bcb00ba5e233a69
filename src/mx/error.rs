use thiserror::Error;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    Idna {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver configuration failed: {source}")]
    ResolverConfig {
        #[source]
        source: std::io::Error,
    },
    #[error("MX query failed: {source}")]
    Query {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::Idna { source }
    }

    pub(crate) fn config(source: std::io::Error) -> Self {
        Self::ResolverConfig { source }
    }

    pub(crate) fn query(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Query { source }
    }
}

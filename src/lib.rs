#![forbid(unsafe_code)]
//! mailvet_lib — batch email deliverability verification (MX + SMTP probe)

pub mod batch;
pub mod classifier;
pub mod format;
pub mod mx;
pub mod probe;
pub mod verify;

#[cfg(feature = "with-csv")]
pub mod report;

pub use batch::DEFAULT_CONCURRENCY;
pub use classifier::{DEFAULT_PUBLIC_DOMAINS, DomainClassifier};
pub use format::is_valid_format;
pub use mx::{DEFAULT_DNS_TIMEOUT, Error as MxError, MxRecord, MxStatus, resolve_mx};
pub use probe::{
    HostAttempt, HostOutcome, ProbeError, ProbeOptions, ProbeReport, SmtpProber, SmtpReply,
};
pub use verify::{VerificationResult, Verdict, Verifier, VerifyOptions};

#[cfg(feature = "with-csv")]
pub use report::{ReportError, read_addresses, write_report};

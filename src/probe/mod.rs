//! SMTP deliverability probing.
//!
//! The public entry point is [`SmtpProber::probe`], which walks a sorted MX
//! list and runs a minimal dialogue (banner, `HELO`, `MAIL FROM`, `RCPT TO`,
//! `QUIT`) against each host until one accepts the recipient or the list is
//! exhausted. Nothing past the envelope is ever sent.

mod error;
mod options;
mod prober;
mod session;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use prober::{HostAttempt, HostOutcome, ProbeReport, SmtpProber};
pub use session::SmtpReply;

use crate::mx::MxRecord;
use crate::probe::error::ProbeError;
use crate::probe::options::ProbeOptions;
use crate::probe::session::{SmtpReply, SmtpSession, socket_addrs};

/// What a single MX host said, or why it gave no positive signal.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    /// `RCPT TO` answered 250/251.
    Accepted { reply: SmtpReply },
    /// `RCPT TO` answered with a non-accepting code.
    Refused { reply: SmtpReply },
    /// No socket address, or every connect attempt failed.
    Unreachable { message: String },
    /// Timeout, dropped connection, malformed reply, or a refusal earlier in
    /// the dialogue.
    ProtocolError { message: String },
}

impl HostOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// One host interrogation, with the session transcript for diagnostics.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAttempt {
    pub exchange: String,
    pub outcome: HostOutcome,
    pub transcript: Vec<String>,
}

/// Outcome of probing every candidate host for one address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub accepted: bool,
    pub attempts: Vec<HostAttempt>,
}

/// Interrogates mail exchangers in preference order.
#[derive(Debug, Clone, Default)]
pub struct SmtpProber {
    options: ProbeOptions,
}

impl SmtpProber {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Tries each host in list order and stops at the first one that accepts
    /// `address`. A host that errors, times out, or answers negatively is
    /// recorded and skipped over; later hosts are never contacted once one
    /// accepts.
    pub fn probe(&self, address: &str, records: &[MxRecord]) -> ProbeReport {
        let mut attempts = Vec::new();
        for record in records {
            let attempt = self.probe_host(&record.exchange, address);
            #[cfg(feature = "with-tracing")]
            tracing::debug!(exchange = %record.exchange, outcome = ?attempt.outcome, "probe attempt");
            let accepted = attempt.outcome.is_accepted();
            attempts.push(attempt);
            if accepted {
                return ProbeReport {
                    accepted: true,
                    attempts,
                };
            }
        }
        ProbeReport {
            accepted: false,
            attempts,
        }
    }

    fn probe_host(&self, exchange: &str, address: &str) -> HostAttempt {
        let unreachable_attempt = |message: String| HostAttempt {
            exchange: exchange.to_string(),
            outcome: HostOutcome::Unreachable { message },
            transcript: Vec::new(),
        };

        let addrs = match socket_addrs(exchange, self.options.port) {
            Ok(addrs) => addrs,
            Err(err) => return unreachable_attempt(err.to_string()),
        };
        let mut session = match SmtpSession::connect(exchange, &addrs, self.options.timeout()) {
            Ok(session) => session,
            Err(err) => return unreachable_attempt(err.to_string()),
        };

        let outcome = match self.dialogue(&mut session, address) {
            Ok(reply) if reply.accepts_recipient() => HostOutcome::Accepted { reply },
            Ok(reply) => HostOutcome::Refused { reply },
            Err(err) => HostOutcome::ProtocolError {
                message: err.to_string(),
            },
        };
        session.quit().ok();

        HostAttempt {
            exchange: exchange.to_string(),
            outcome,
            transcript: session.into_transcript(),
        }
    }

    /// Banner, `HELO`, `MAIL FROM`, then `RCPT TO`; returns the RCPT reply.
    fn dialogue(&self, session: &mut SmtpSession, address: &str) -> Result<SmtpReply, ProbeError> {
        let banner = session.read_banner()?;
        if !banner.is_positive_completion() {
            return Err(ProbeError::UnexpectedReply {
                command: "banner",
                code: banner.code,
            });
        }
        let helo = session.send_command(&format!("HELO {}", self.options.helo_host))?;
        if !helo.is_positive_completion() {
            return Err(ProbeError::UnexpectedReply {
                command: "HELO",
                code: helo.code,
            });
        }
        let mail = session.send_command(&format!("MAIL FROM:<{}>", self.options.mail_from))?;
        if !mail.is_positive_completion() {
            return Err(ProbeError::UnexpectedReply {
                command: "MAIL FROM",
                code: mail.code,
            });
        }
        session.send_command(&format!("RCPT TO:<{address}>"))
    }
}

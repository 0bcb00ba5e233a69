use std::time::Duration;

/// Static identities and limits used by the prober.
///
/// The defaults match the historical probing constants; override them to
/// present a real sending identity or to point tests at a local server.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Host name announced in `HELO`.
    pub helo_host: String,
    /// Envelope sender for `MAIL FROM`.
    pub mail_from: String,
    /// SMTP port.
    pub port: u16,
    /// Deadline applied to connect and to every read/write, milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            helo_host: "example.com".to_string(),
            mail_from: "check@example.com".to_string(),
            port: 25,
            timeout_ms: 10_000,
        }
    }
}

impl ProbeOptions {
    /// Per-step deadline as a [`Duration`]. A zero timeout disables the
    /// connect/read deadline.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no socket address for {host}")]
    NoAddress { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("unexpected reply to {command}: {code}")]
    UnexpectedReply { command: &'static str, code: u16 },
}

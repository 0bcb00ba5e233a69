use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::probe::error::ProbeError;

/// A raw SMTP reply: status code plus the text of every reply line.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// RFC 5321: 250 OK, 251 user not local but the server will forward.
    pub fn accepts_recipient(&self) -> bool {
        matches!(self.code, 250 | 251)
    }
}

pub(crate) fn socket_addrs(host: &str, port: u16) -> Result<Vec<SocketAddr>, ProbeError> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(ProbeError::NoAddress {
            host: host.to_string(),
        });
    }
    Ok(addrs)
}

/// One TCP conversation with a mail exchanger, transcript included.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    transcript: Vec<String>,
}

impl SmtpSession {
    pub(crate) fn connect(
        host: &str,
        addrs: &[SocketAddr],
        timeout: Option<Duration>,
    ) -> Result<Self, ProbeError> {
        let mut last_err = None;
        for addr in addrs {
            let attempt = match timeout {
                Some(deadline) => TcpStream::connect_timeout(addr, deadline),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(timeout)?;
                    stream.set_write_timeout(timeout)?;
                    let reader = BufReader::new(stream.try_clone()?);
                    return Ok(Self {
                        host: host.to_string(),
                        stream,
                        reader,
                        transcript: Vec::new(),
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(ProbeError::Connect {
            host: host.to_string(),
            source: last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::AddrNotAvailable, "no socket address available")
            }),
        })
    }

    pub(crate) fn read_banner(&mut self) -> Result<SmtpReply, ProbeError> {
        self.read_reply()
    }

    pub(crate) fn send_command(&mut self, command: &str) -> Result<SmtpReply, ProbeError> {
        self.record("C", command);
        self.write_line(command)?;
        self.read_reply()
    }

    /// Best effort: the verdict is already known once QUIT goes out.
    pub(crate) fn quit(&mut self) -> Result<(), ProbeError> {
        self.record("C", "QUIT");
        self.write_line("QUIT")?;
        if let Ok(reply) = self.read_reply_silent() {
            self.record_reply(&reply);
        }
        Ok(())
    }

    pub(crate) fn into_transcript(self) -> Vec<String> {
        self.transcript
    }

    fn write_line(&mut self, command: &str) -> Result<(), ProbeError> {
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream.write_all(&line)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let reply = self.read_reply_silent()?;
        self.record_reply(&reply);
        Ok(reply)
    }

    fn read_reply_silent(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut code: Option<u16> = None;
        let mut lines = Vec::new();
        loop {
            let mut raw = String::new();
            let read = self.reader.read_line(&mut raw)?;
            if read == 0 {
                return Err(ProbeError::Protocol(
                    "connection closed while reading reply".to_string(),
                ));
            }
            while raw.ends_with('\n') || raw.ends_with('\r') {
                raw.pop();
            }
            if raw.len() < 3 {
                return Err(ProbeError::Protocol(format!("invalid SMTP reply: '{raw}'")));
            }
            let parsed = raw
                .get(..3)
                .and_then(|code| code.parse::<u16>().ok())
                .ok_or_else(|| ProbeError::Protocol(format!("invalid status code in '{raw}'")))?;
            match code {
                Some(existing) if existing != parsed => {
                    return Err(ProbeError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed}"
                    )));
                }
                None => code = Some(parsed),
                _ => {}
            }
            let more = raw.as_bytes().get(3) == Some(&b'-');
            lines.push(raw.get(4..).unwrap_or("").to_string());
            if !more {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            lines,
        })
    }

    fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.lines.is_empty() {
            self.record("S", &reply.code.to_string());
        } else {
            for line in &reply.lines {
                self.record("S", &format!("{} {}", reply.code, line));
            }
        }
    }
}

//! Error types for the `upstream` crate.
use std::error::Error as StdError;
use std::fmt;

/// Error raised while setting up or consuming the upstream stream.
/// The `source` field holds the originating library error; `error_kind`
/// is what callers branch on, keeping the `eventsource-client` types from
/// leaking past this crate's boundary.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured upstream URL could not be turned into a client.
    /// This is a startup misconfiguration, not a runtime stream failure.
    InvalidUrl,
    /// A network-level failure on the live stream. Recovered by the
    /// connector's reconnect loop, never fatal.
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Upstream Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<eventsource_client::Error> for Error {
    fn from(err: eventsource_client::Error) -> Self {
        let error_kind = match err {
            eventsource_client::Error::InvalidParameter(_) => ErrorKind::InvalidUrl,
            _ => ErrorKind::Transport,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

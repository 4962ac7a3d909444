//! HTTP(S) transport
//!
//! Follows exactly one redirect (301, 302 or 307). The redirected request
//! must answer 200.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::domain::ports::{RemoteEntry, Transport, TransportError, TransportResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(CONNECT_TIMEOUT)
                .redirects(0)
                .build(),
        }
    }

    fn get(&self, url: &str) -> TransportResult<ureq::Response> {
        match self.agent.get(url).call() {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(404 | 410, _)) => Err(TransportError::NotFound),
            Err(ureq::Error::Status(code, _)) => Err(TransportError::Connection {
                message: format!("server answered HTTP {code} for {url}"),
            }),
            Err(ureq::Error::Transport(t)) => Err(TransportError::Connection {
                message: t.to_string(),
            }),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

fn is_followed_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 307)
}

impl Transport for HttpTransport {
    fn fetch(&self, location: &str) -> TransportResult<Vec<u8>> {
        let base = Url::parse(location).map_err(|e| TransportError::InvalidUrl {
            message: e.to_string(),
        })?;

        let mut response = self.get(base.as_str())?;
        if is_followed_redirect(response.status()) {
            let target = response
                .header("location")
                .ok_or_else(|| TransportError::Connection {
                    message: format!("redirect from {location} has no target"),
                })?;
            let target = base.join(target).map_err(|e| TransportError::InvalidUrl {
                message: e.to_string(),
            })?;
            debug!(from = %location, to = %target, "following redirect");
            response = self.get(target.as_str())?;
        }

        if response.status() != 200 {
            return Err(TransportError::Connection {
                message: format!("unexpected HTTP {} for {location}", response.status()),
            });
        }

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn list(&self, folder: &str) -> TransportResult<Vec<RemoteEntry>> {
        Err(TransportError::Io(std::io::Error::new(
            ErrorKind::Unsupported,
            format!("cannot list HTTP folder {folder}"),
        )))
    }
}

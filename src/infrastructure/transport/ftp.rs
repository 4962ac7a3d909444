//! Anonymous FTP transport
//!
//! One control connection per call, binary mode, passive data connections.

use std::net::ToSocketAddrs;
use std::str::FromStr;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use suppaftp::list::File as ListedFile;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Status};
use tracing::{debug, trace};
use url::Url;

use crate::domain::ports::{RemoteEntry, Transport, TransportError, TransportResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const ANONYMOUS_USER: &str = "anonymous";
const ANONYMOUS_PASSWORD: &str = "catsync@localhost";

#[derive(Debug, Clone, Copy, Default)]
pub struct FtpTransport;

impl FtpTransport {
    pub fn new() -> Self {
        Self
    }

    /// Open a logged-in binary session and return it with the URL path.
    fn session(&self, location: &str) -> TransportResult<(FtpStream, String)> {
        let url = Url::parse(location).map_err(|e| TransportError::InvalidUrl {
            message: e.to_string(),
        })?;
        if url.scheme() != "ftp" {
            return Err(TransportError::InvalidUrl {
                message: format!("expected an ftp address, found '{}'", url.scheme()),
            });
        }
        let host = url.host_str().ok_or_else(|| TransportError::InvalidUrl {
            message: "address has no host".to_string(),
        })?;
        let port = url.port().unwrap_or(21);

        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| TransportError::Connection {
                message: format!("cannot resolve {host}: {e}"),
            })?
            .next()
            .ok_or_else(|| TransportError::Connection {
                message: format!("no address for {host}"),
            })?;

        trace!(%host, port, "connecting");
        let mut stream = FtpStream::connect_timeout(addr, CONNECT_TIMEOUT).map_err(connection)?;
        let user = match url.username() {
            "" => ANONYMOUS_USER,
            user => user,
        };
        stream
            .login(user, url.password().unwrap_or(ANONYMOUS_PASSWORD))
            .map_err(connection)?;
        stream.transfer_type(FileType::Binary).map_err(connection)?;

        let path = server_path(&url);
        Ok((stream, path))
    }
}

fn connection(err: FtpError) -> TransportError {
    TransportError::Connection {
        message: err.to_string(),
    }
}

/// 550 means the file or folder is not there; anything else is the connection's fault.
fn classify(err: FtpError) -> TransportError {
    match &err {
        FtpError::UnexpectedResponse(response) if response.status == Status::FileUnavailable => {
            TransportError::NotFound
        }
        _ => connection(err),
    }
}

/// The URL path as the server names it.
fn server_path(url: &Url) -> String {
    percent_decode_str(url.path()).decode_utf8_lossy().into_owned()
}

impl Transport for FtpTransport {
    fn fetch(&self, location: &str) -> TransportResult<Vec<u8>> {
        let (mut stream, path) = self.session(location)?;
        debug!(%location, "ftp retrieve");
        let result = stream.retr_as_buffer(&path).map_err(classify);
        let _ = stream.quit();
        Ok(result?.into_inner())
    }

    fn list(&self, folder: &str) -> TransportResult<Vec<RemoteEntry>> {
        let (mut stream, path) = self.session(folder)?;
        let result = stream
            .cwd(&path)
            .and_then(|_| stream.list(None))
            .map_err(classify);
        let _ = stream.quit();

        let entries = result?
            .iter()
            .filter_map(|line| ListedFile::from_str(line).ok())
            .map(|file| {
                if file.is_directory() {
                    RemoteEntry::folder(file.name())
                } else {
                    RemoteEntry::file(file.name())
                }
            })
            .collect();
        Ok(entries)
    }
}

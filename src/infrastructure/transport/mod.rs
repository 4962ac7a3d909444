//! Transport implementations

mod file;
mod ftp;
mod http;
mod memory;

pub use file::FileTransport;
pub use ftp::FtpTransport;
pub use http::HttpTransport;
pub use memory::MemoryTransport;

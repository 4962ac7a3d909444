//! Capabilities a catalog server needs to do its work

use std::sync::Arc;

use crate::domain::entities::AppProfile;
use crate::domain::ports::{ArchiveExtractor, ChecksumVerifier, Transport};
use crate::infrastructure::archive::TarGzExtractor;
use crate::infrastructure::checksum::ManifestChecksum;
use crate::infrastructure::transport::{FileTransport, FtpTransport, HttpTransport};

/// Application profile plus the transport, checksum and extract capabilities.
///
/// Passed explicitly into every catalog server operation instead of being
/// looked up from ambient state.
#[derive(Clone)]
pub struct ServerContext {
    pub profile: AppProfile,
    pub ftp: Arc<dyn Transport>,
    pub http: Arc<dyn Transport>,
    pub files: Arc<dyn Transport>,
    pub checksum: Arc<dyn ChecksumVerifier>,
    pub extractor: Arc<dyn ArchiveExtractor>,
}

impl ServerContext {
    /// Network transports, the built-in manifest checksum and tar+gzip bundles.
    pub fn new(profile: AppProfile) -> Self {
        Self {
            profile,
            ftp: Arc::new(FtpTransport::new()),
            http: Arc::new(HttpTransport::new()),
            files: Arc::new(FileTransport::new()),
            checksum: Arc::new(ManifestChecksum::new()),
            extractor: Arc::new(TarGzExtractor::new()),
        }
    }

    pub fn with_ftp(mut self, transport: Arc<dyn Transport>) -> Self {
        self.ftp = transport;
        self
    }

    pub fn with_http(mut self, transport: Arc<dyn Transport>) -> Self {
        self.http = transport;
        self
    }

    pub fn with_files(mut self, transport: Arc<dyn Transport>) -> Self {
        self.files = transport;
        self
    }

    pub fn with_checksum(mut self, checksum: Arc<dyn ChecksumVerifier>) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ArchiveExtractor>) -> Self {
        self.extractor = extractor;
        self
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

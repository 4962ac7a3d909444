//! Catalog servers
//!
//! A `CatalogServer` is one named source of configuration, backed by one of
//! four transports. All of them answer the same questions: which publishers
//! exist, where a publisher's resources live, whether the local cache is
//! stale, and how to fill a cache folder.
//!
//! Descriptor-driven servers (FTP, HTTP, file system with descriptor) read
//! their catalog at most once per instance. A failed read is not remembered,
//! so the next call tries again.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::context::ServerContext;
use super::creation::ServerKind;
use super::transfer;
use super::url::{clean_folder_path, clean_ftp_url, clean_http_url, join_location, require_scheme};
use crate::domain::entities::Descriptor;
use crate::domain::ports::{Transport, TransportError};
use crate::domain::services::parse_descriptor;
use crate::domain::value_objects::ResourceLocation;
use crate::error::{CatalogError, CatalogResult};

/// Name of the checksum sidecar at the root of a template folder.
pub const TEMPLATE_FOLDER_SIDECAR: &str = "WorkgroupTemplates.md5";

/// Extension appended to a file's location to find its checksum sidecar.
pub const SIDECAR_EXTENSION: &str = ".md5";

/// Memoized catalog descriptor
#[derive(Debug, Clone, Default)]
pub enum DescriptorState {
    #[default]
    NotFetched,
    Fetched(Arc<Descriptor>),
}

impl DescriptorState {
    pub fn is_fetched(&self) -> bool {
        matches!(self, DescriptorState::Fetched(_))
    }
}

/// Outcome of a connectivity probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProbe {
    pub reachable: bool,
    pub message: String,
}

impl ServerProbe {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            reachable: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            reachable: false,
            message: message.into(),
        }
    }
}

/// A named catalog server. Identity is the name alone.
#[derive(Debug)]
pub struct CatalogServer {
    name: String,
    kind: ServerKind,
    descriptor: Mutex<DescriptorState>,
    simulate_network_error: AtomicBool,
}

impl CatalogServer {
    pub fn new(name: impl Into<String>, kind: ServerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            descriptor: Mutex::new(DescriptorState::NotFetched),
            simulate_network_error: AtomicBool::new(false),
        }
    }

    pub fn ftp(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            ServerKind::Ftp {
                address: address.into(),
            },
        )
    }

    pub fn http(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            ServerKind::Http {
                address: address.into(),
            },
        )
    }

    pub fn file_system(
        name: impl Into<String>,
        library_file: impl Into<String>,
        template_folder: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            ServerKind::LocalFileSystem {
                library_file: library_file.into(),
                template_folder: template_folder.into(),
            },
        )
    }

    pub fn file_system_ini(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            ServerKind::LocalFileSystemIni {
                address: address.into(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ServerKind {
        &self.kind
    }

    pub fn creation_string(&self) -> String {
        self.kind.creation_string()
    }

    pub fn descriptor_state(&self) -> DescriptorState {
        self.descriptor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `test_server` report a network failure (test hook).
    pub fn simulate_network_error(&self, fake: bool) {
        self.simulate_network_error.store(fake, Ordering::Relaxed);
    }

    // ------------------------------------------------------------------
    // Catalog queries
    // ------------------------------------------------------------------

    pub fn get_publishers(&self, ctx: &ServerContext) -> CatalogResult<Vec<String>> {
        match &self.kind {
            ServerKind::LocalFileSystem { .. } => Ok(vec![self.name.clone()]),
            _ => Ok(self.descriptor(ctx)?.publisher_names()),
        }
    }

    pub fn does_publisher_exist(&self, ctx: &ServerContext, publisher: &str) -> CatalogResult<bool> {
        match &self.kind {
            ServerKind::LocalFileSystem { .. } => Ok(publisher == self.name),
            _ => Ok(self.descriptor(ctx)?.contains(publisher)),
        }
    }

    pub fn get_resource_location(
        &self,
        ctx: &ServerContext,
        publisher: &str,
    ) -> CatalogResult<ResourceLocation> {
        match &self.kind {
            ServerKind::LocalFileSystem {
                library_file,
                template_folder,
            } => Ok(ResourceLocation::Legacy {
                master_library: library_file.clone(),
                template_folder: template_folder.clone(),
            }),
            _ => {
                let descriptor = self.descriptor(ctx)?;
                let entry = descriptor
                    .get(publisher)
                    .ok_or_else(|| self.publisher_missing(publisher))?;
                Ok(entry.location.clone())
            }
        }
    }

    /// Publisher's web page, if the catalog lists one
    pub fn get_web_link(&self, ctx: &ServerContext, publisher: &str) -> CatalogResult<Option<String>> {
        match &self.kind {
            ServerKind::LocalFileSystem { .. } => Ok(None),
            _ => {
                let descriptor = self.descriptor(ctx)?;
                let entry = descriptor
                    .get(publisher)
                    .ok_or_else(|| self.publisher_missing(publisher))?;
                Ok(entry.web_link.clone())
            }
        }
    }

    /// Location the master library (or bundle) is taken from.
    pub fn get_master_library_url(&self, ctx: &ServerContext, publisher: &str) -> CatalogResult<String> {
        Ok(match self.get_resource_location(ctx, publisher)? {
            ResourceLocation::Legacy { master_library, .. } => master_library,
            ResourceLocation::Bundle { archive } => archive,
        })
    }

    // ------------------------------------------------------------------
    // Cache operations
    // ------------------------------------------------------------------

    /// True when the cache in `cache_folder` differs from the server.
    pub fn check_for_updates(
        &self,
        ctx: &ServerContext,
        publisher: &str,
        cache_folder: &Path,
    ) -> CatalogResult<bool> {
        if let ServerKind::LocalFileSystem {
            library_file,
            template_folder,
        } = &self.kind
        {
            return self.check_file_system(ctx, library_file, template_folder, cache_folder);
        }

        let location = self.location_for_cache_operation(ctx, publisher)?;
        let staging = tempfile::tempdir()?;
        let transport = self.resource_transport(ctx);

        let pending = match location {
            ResourceLocation::Legacy {
                master_library,
                template_folder,
            } => {
                let library = self.resource_file(&master_library)?;
                let templates = self.resource_folder(&template_folder)?;

                let library_sidecar = staging.path().join(sidecar_name(&ctx.profile.master_library_file));
                let template_sidecar = staging.path().join(TEMPLATE_FOLDER_SIDECAR);
                let have_library =
                    fetch_sidecar(transport, &sidecar_of(&library), &library_sidecar)?;
                let have_templates = fetch_sidecar(
                    transport,
                    &join_location(&templates, TEMPLATE_FOLDER_SIDECAR),
                    &template_sidecar,
                )?;
                if !(have_library && have_templates) {
                    warn!(server = %self.name, %publisher, "checksum sidecar missing, assuming update needed");
                    return Ok(true);
                }

                let library_matches = ctx
                    .checksum
                    .compare(&library_sidecar, &ctx.profile.cached_master_library(cache_folder))?
                    .is_match();
                let templates_match = ctx
                    .checksum
                    .compare(&template_sidecar, &ctx.profile.cached_template_folder(cache_folder))?
                    .is_match();
                !(library_matches && templates_match)
            }
            ResourceLocation::Bundle { archive } => {
                let archive = self.resource_file(&archive)?;
                let sidecar = staging.path().join(sidecar_name(&ctx.profile.bundle_file_name()));
                if !fetch_sidecar(transport, &sidecar_of(&archive), &sidecar)? {
                    warn!(server = %self.name, %publisher, "bundle checksum missing, assuming update needed");
                    return Ok(true);
                }
                !ctx
                    .checksum
                    .compare(&sidecar, &ctx.profile.cached_bundle(cache_folder))?
                    .is_match()
            }
        };

        debug!(server = %self.name, %publisher, pending, "checked for updates");
        Ok(pending)
    }

    /// Fill `cache_folder` with the publisher's library and templates.
    pub fn populate_catalog(
        &self,
        ctx: &ServerContext,
        publisher: &str,
        cache_folder: &Path,
    ) -> CatalogResult<()> {
        info!(server = %self.name, %publisher, folder = %cache_folder.display(), "populating cache");

        if let ServerKind::LocalFileSystem {
            library_file,
            template_folder,
        } = &self.kind
        {
            return self.populate_legacy(ctx, library_file, template_folder, cache_folder);
        }

        match self.location_for_cache_operation(ctx, publisher)? {
            ResourceLocation::Legacy {
                master_library,
                template_folder,
            } => {
                let library = self.resource_file(&master_library)?;
                let templates = self.resource_folder(&template_folder)?;
                self.populate_legacy(ctx, &library, &templates, cache_folder)
            }
            ResourceLocation::Bundle { archive } => {
                let archive = self.resource_file(&archive)?;
                self.populate_bundle(ctx, &archive, cache_folder)
            }
        }
    }

    /// Connectivity probe. Never touches a cache.
    pub fn test_server(&self, ctx: &ServerContext) -> ServerProbe {
        if self.simulate_network_error.load(Ordering::Relaxed) {
            return ServerProbe::failed("simulated network error");
        }

        match &self.kind {
            ServerKind::LocalFileSystem {
                library_file,
                template_folder,
            } => {
                if !library_file.is_empty() && !matches!(ctx.files.exists(library_file), Ok(true)) {
                    return ServerProbe::failed(format!(
                        "Error finding master library file at: {library_file}"
                    ));
                }
                let folder = template_folder.trim_end_matches(['/', '\\']);
                if !matches!(ctx.files.exists(folder), Ok(true)) {
                    return ServerProbe::failed(format!(
                        "Error finding template folder at: {template_folder}"
                    ));
                }
                ServerProbe::ok("library and template folder found")
            }
            _ => match self.fetch_descriptor(ctx) {
                Ok(descriptor) => ServerProbe::ok(format!(
                    "catalog lists {} publisher(s)",
                    descriptor.publishers().len()
                )),
                Err(e) => ServerProbe::failed(e.to_string()),
            },
        }
    }

    pub fn is_network_error(&self, ctx: &ServerContext) -> bool {
        !self.test_server(ctx).reachable
    }

    // ------------------------------------------------------------------
    // Descriptor handling
    // ------------------------------------------------------------------

    /// Parsed descriptor, fetched on first use.
    pub fn descriptor(&self, ctx: &ServerContext) -> CatalogResult<Arc<Descriptor>> {
        let mut state = self
            .descriptor
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let DescriptorState::Fetched(descriptor) = &*state {
            return Ok(Arc::clone(descriptor));
        }

        let descriptor = Arc::new(self.fetch_descriptor(ctx)?);
        *state = DescriptorState::Fetched(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    fn fetch_descriptor(&self, ctx: &ServerContext) -> CatalogResult<Descriptor> {
        let file_name = ctx.profile.descriptor_file_name();
        let location = match &self.kind {
            ServerKind::Ftp { address } => {
                let url = join_location(&clean_ftp_url(address, false), &file_name);
                require_scheme(&url, &["ftp"])?;
                url
            }
            ServerKind::Http { address } => {
                let url = join_location(&clean_http_url(address, false), &file_name);
                require_scheme(&url, &["http", "https"])?;
                url
            }
            ServerKind::LocalFileSystemIni { address } => {
                join_location(&clean_folder_path(address), &file_name)
            }
            ServerKind::LocalFileSystem { .. } => {
                return Err(CatalogError::DescriptorFormatError {
                    message: format!("server '{}' has no catalog descriptor", self.name),
                })
            }
        };

        debug!(server = %self.name, %location, "fetching catalog descriptor");
        let bytes = self
            .descriptor_transport(ctx)
            .fetch(&location)
            .map_err(|e| match e {
                TransportError::NotFound => {
                    self.fetch_failure(format!("Could not find configuration: {location}"), false)
                }
                TransportError::Connection { message } => self.fetch_failure(
                    format!("An error occurred while trying to access the configuration server: {message} ({location})"),
                    true,
                ),
                other => self.fetch_failure(format!("{other} ({location})"), false),
            })?;

        let text = String::from_utf8_lossy(&bytes);
        let descriptor = parse_descriptor(&text, &ctx.profile.app_version)?;
        info!(
            server = %self.name,
            publishers = descriptor.publishers().len(),
            skipped = descriptor.warnings().len(),
            "catalog descriptor loaded"
        );
        Ok(descriptor)
    }

    fn descriptor_transport<'a>(&self, ctx: &'a ServerContext) -> &'a dyn Transport {
        self.resource_transport(ctx)
    }

    fn resource_transport<'a>(&self, ctx: &'a ServerContext) -> &'a dyn Transport {
        match &self.kind {
            ServerKind::Ftp { .. } => ctx.ftp.as_ref(),
            ServerKind::Http { .. } => ctx.http.as_ref(),
            ServerKind::LocalFileSystem { .. } | ServerKind::LocalFileSystemIni { .. } => {
                ctx.files.as_ref()
            }
        }
    }

    /// Publisher's location, restricted to the formats this backend can sync.
    fn location_for_cache_operation(
        &self,
        ctx: &ServerContext,
        publisher: &str,
    ) -> CatalogResult<ResourceLocation> {
        let location = self.get_resource_location(ctx, publisher)?;
        let bundle_only = matches!(
            self.kind,
            ServerKind::Http { .. } | ServerKind::LocalFileSystemIni { .. }
        );
        if bundle_only && matches!(location, ResourceLocation::Legacy { .. }) {
            return Err(CatalogError::DescriptorFormatError {
                message: format!(
                    "publisher '{publisher}' on '{}' is not a pgz catalog; only pgz compressed catalogs are supported on {} servers",
                    self.name,
                    self.kind.tag()
                ),
            });
        }
        Ok(location)
    }

    fn resource_file(&self, raw: &str) -> CatalogResult<String> {
        self.normalize_resource(raw, true)
    }

    fn resource_folder(&self, raw: &str) -> CatalogResult<String> {
        self.normalize_resource(raw, false)
    }

    fn normalize_resource(&self, raw: &str, is_file: bool) -> CatalogResult<String> {
        match &self.kind {
            ServerKind::Ftp { .. } => {
                let url = clean_ftp_url(raw, is_file);
                require_scheme(&url, &["ftp"])?;
                Ok(url)
            }
            ServerKind::Http { .. } => {
                let url = clean_http_url(raw, is_file);
                require_scheme(&url, &["http", "https"])?;
                Ok(url)
            }
            ServerKind::LocalFileSystem { .. } | ServerKind::LocalFileSystemIni { .. } => {
                if is_file {
                    Ok(raw.trim().to_string())
                } else {
                    Ok(clean_folder_path(raw))
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Backend work
    // ------------------------------------------------------------------

    fn check_file_system(
        &self,
        ctx: &ServerContext,
        library_file: &str,
        template_folder: &str,
        cache_folder: &Path,
    ) -> CatalogResult<bool> {
        let default_pending = !ctx.profile.assume_current_without_checksums;
        let staging = tempfile::tempdir()?;
        let library_sidecar = staging.path().join(sidecar_name(&ctx.profile.master_library_file));
        let template_sidecar = staging.path().join(TEMPLATE_FOLDER_SIDECAR);

        let have_library = library_file.is_empty()
            || copy_sidecar(ctx.files.as_ref(), &sidecar_of(library_file), &library_sidecar);
        let have_templates = copy_sidecar(
            ctx.files.as_ref(),
            &join_location(&clean_folder_path(template_folder), TEMPLATE_FOLDER_SIDECAR),
            &template_sidecar,
        );

        if !(have_library && have_templates) {
            debug!(server = %self.name, default_pending, "checksum sidecars missing");
            return Ok(default_pending);
        }

        let library_matches = library_file.is_empty()
            || ctx
                .checksum
                .compare(&library_sidecar, &ctx.profile.cached_master_library(cache_folder))?
                .is_match();
        let templates_match = ctx
            .checksum
            .compare(&template_sidecar, &ctx.profile.cached_template_folder(cache_folder))?
            .is_match();

        Ok(!(library_matches && templates_match))
    }

    fn populate_legacy(
        &self,
        ctx: &ServerContext,
        library: &str,
        templates: &str,
        cache_folder: &Path,
    ) -> CatalogResult<()> {
        let transport = self.resource_transport(ctx);

        if !library.is_empty() {
            let dest = ctx.profile.cached_master_library(cache_folder);
            transfer::download_file(transport, library, &dest)?;
            debug!(from = %library, to = %dest.display(), "master library downloaded");
        }

        let dest = ctx.profile.cached_template_folder(cache_folder);
        std::fs::create_dir_all(&dest).map_err(|e| CatalogError::DownloadFailure {
            location: dest.display().to_string(),
            message: format!("Error creating Template Folder: {e}"),
        })?;
        let copied = transfer::download_templates(transport, templates, &dest, &ctx.profile)?;
        info!(server = %self.name, templates = copied, "template folder downloaded");
        Ok(())
    }

    fn populate_bundle(&self, ctx: &ServerContext, archive: &str, cache_folder: &Path) -> CatalogResult<()> {
        let transport = self.resource_transport(ctx);
        let cached = ctx.profile.cached_bundle(cache_folder);
        transfer::download_file(transport, archive, &cached)?;

        let staging = tempfile::tempdir()?;
        let sidecar = staging.path().join(sidecar_name(&ctx.profile.bundle_file_name()));
        transfer::download_file(transport, &sidecar_of(archive), &sidecar)?;
        if !ctx.checksum.compare(&sidecar, &cached)?.is_match() {
            return Err(CatalogError::DownloadFailure {
                location: archive.to_string(),
                message: format!(
                    "the checksum of {} does not match the server's; try updating again and contact the server owner if this persists",
                    cached.display()
                ),
            });
        }

        let files = ctx
            .extractor
            .extract(&cached, cache_folder)
            .map_err(|e| CatalogError::DownloadFailure {
                location: cached.display().to_string(),
                message: e.to_string(),
            })?;
        info!(server = %self.name, files, "bundle extracted");
        Ok(())
    }

    fn publisher_missing(&self, publisher: &str) -> CatalogError {
        self.fetch_failure(
            format!("the publisher '{publisher}' was not found in the configuration information"),
            false,
        )
    }

    fn fetch_failure(&self, message: String, network: bool) -> CatalogError {
        CatalogError::CatalogFetchFailure {
            server: self.name.clone(),
            message,
            network,
        }
    }
}

impl Clone for CatalogServer {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            descriptor: Mutex::new(self.descriptor_state()),
            simulate_network_error: AtomicBool::new(
                self.simulate_network_error.load(Ordering::Relaxed),
            ),
        }
    }
}

impl PartialEq for CatalogServer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CatalogServer {}

impl std::hash::Hash for CatalogServer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

fn sidecar_of(location: &str) -> String {
    format!("{location}{SIDECAR_EXTENSION}")
}

fn sidecar_name(file_name: &str) -> PathBuf {
    PathBuf::from(sidecar_of(file_name))
}

/// Download a sidecar. `Ok(false)` when the server does not have it.
fn fetch_sidecar(transport: &dyn Transport, location: &str, dest: &Path) -> CatalogResult<bool> {
    match transport.fetch_to(location, dest) {
        Ok(()) => Ok(true),
        Err(TransportError::NotFound) => Ok(false),
        Err(e) => Err(CatalogError::from_transport(location, e)),
    }
}

/// Local sidecar copy; any failure counts as missing.
fn copy_sidecar(transport: &dyn Transport, location: &str, dest: &Path) -> bool {
    match transport.fetch_to(location, dest) {
        Ok(()) => true,
        Err(e) => {
            debug!(%location, error = %e, "sidecar not copied");
            false
        }
    }
}

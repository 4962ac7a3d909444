//! Publishing tree builder

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use catsync::catalog::{SIDECAR_EXTENSION, TEMPLATE_FOLDER_SIDECAR};
use catsync::infrastructure::ManifestChecksum;

pub const LIBRARY_FILE: &str = "WSDOT.lbr";

/// A catalog server's content on disk
pub struct TestCatalog {
    pub dir: TempDir,
}

impl TestCatalog {
    pub fn builder() -> TestCatalogBuilder {
        TestCatalogBuilder::default()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn library(&self) -> PathBuf {
        self.root().join(LIBRARY_FILE)
    }

    pub fn templates(&self) -> PathBuf {
        self.root().join("Templates")
    }

    /// `FILSYS|<library>|<templates>`
    pub fn file_system_creation(&self) -> String {
        format!(
            "FILSYS|{}|{}",
            self.library().display(),
            self.templates().display()
        )
    }

    /// `FILSYSINI|<root>`
    pub fn ini_creation(&self) -> String {
        format!("FILSYSINI|{}", self.root().display())
    }

    /// Overwrite a published file and refresh the sidecars.
    pub fn republish(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        write_sidecars(self.root(), "pgt");
    }

    /// Path of a bundle written with `with_bundle`.
    pub fn bundle(&self, name: &str) -> PathBuf {
        self.root().join("bundles").join(name)
    }
}

#[derive(Default)]
pub struct TestCatalogBuilder {
    library: Option<String>,
    templates: Vec<(String, String)>,
    descriptor: Option<(String, String)>,
    bundles: Vec<(String, Vec<(String, String)>)>,
    sidecars: bool,
}

impl TestCatalogBuilder {
    pub fn with_library(mut self, content: &str) -> Self {
        self.library = Some(content.to_string());
        self
    }

    pub fn with_template(mut self, relative: &str, content: &str) -> Self {
        self.templates.push((relative.to_string(), content.to_string()));
        self
    }

    /// `PGSuperPackages.ini` style descriptor. `{root}` expands to the catalog folder.
    pub fn with_descriptor(mut self, file_name: &str, text: &str) -> Self {
        self.descriptor = Some((file_name.to_string(), text.to_string()));
        self
    }

    /// tar.gz bundle under `bundles/<name>` with a manifest sidecar.
    pub fn with_bundle(mut self, name: &str, files: &[(&str, &str)]) -> Self {
        self.bundles.push((
            name.to_string(),
            files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
        ));
        self
    }

    pub fn with_sidecars(mut self) -> Self {
        self.sidecars = true;
        self
    }

    pub fn build(self) -> TestCatalog {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        if let Some(content) = &self.library {
            fs::write(root.join(LIBRARY_FILE), content).unwrap();
        }
        fs::create_dir_all(root.join("Templates")).unwrap();
        for (relative, content) in &self.templates {
            let path = root.join("Templates").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        for (name, files) in &self.bundles {
            let path = root.join("bundles").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            write_bundle(&path, files);
            let mut sidecar = path.as_os_str().to_os_string();
            sidecar.push(SIDECAR_EXTENSION);
            ManifestChecksum::new()
                .generate(&path, Path::new(&sidecar))
                .unwrap();
        }

        if let Some((file_name, text)) = &self.descriptor {
            let text = text.replace("{root}", &root.display().to_string());
            fs::write(root.join(file_name), text).unwrap();
        }

        if self.sidecars {
            write_sidecars(root, "pgt");
        }

        TestCatalog { dir }
    }
}

fn write_sidecars(root: &Path, extension: &str) {
    let checksum = ManifestChecksum::new();
    let library = root.join(LIBRARY_FILE);
    if library.exists() {
        let mut sidecar = library.as_os_str().to_os_string();
        sidecar.push(SIDECAR_EXTENSION);
        checksum.generate(&library, Path::new(&sidecar)).unwrap();
    }
    let templates = root.join("Templates");
    checksum
        .generate_filtered(&templates, &templates.join(TEMPLATE_FOLDER_SIDECAR), |p| {
            p.extension().is_some_and(|e| e == extension)
        })
        .unwrap();
}

fn write_bundle(path: &Path, files: &[(String, String)]) {
    let file = fs::File::create(path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (relative, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, relative, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap().flush().unwrap();
}

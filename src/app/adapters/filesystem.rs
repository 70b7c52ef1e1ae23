//! Local filesystem catalog and profile reader
//!
//! Profiles live under a directory tree (the layout of an Argo GDAC mirror
//! or any flat folder). Float lists and resolved file lists are plain text
//! files with one entry per line; blank lines and `#` comments are ignored.

use crate::app::adapters::json_source::read_json_profile;
use crate::app::interfaces::{ProfileCatalog, ProfileSource};
use crate::app::models::ProfileFile;
use crate::constants::PROFILE_FILE_EXTENSIONS;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Read a one-entry-per-line list file
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read list '{}'", path.display()), e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Write a one-entry-per-line list file, creating parent directories
pub fn write_id_list<S: AsRef<str>>(path: &Path, ids: &[S]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(format!("Failed to create directory '{}'", parent.display()), e)
        })?;
    }
    let mut text = String::new();
    for id in ids {
        text.push_str(id.as_ref());
        text.push('\n');
    }
    std::fs::write(path, text)
        .map_err(|e| Error::io(format!("Failed to write list '{}'", path.display()), e))
}

/// List profile files under `root`, sorted by path
pub fn scan_profile_files(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::io(
            format!("Profile directory does not exist: {}", root.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "Directory not found"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to scan '{}'", root.display()), e)
        })?;
        let path = entry.path();
        let recognised = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PROFILE_FILE_EXTENSIONS.contains(&ext));
        if entry.file_type().is_file() && recognised {
            files.push(path.display().to_string());
        }
    }
    files.sort();

    debug!("Found {} profile files under {}", files.len(), root.display());
    Ok(files)
}

/// Catalog backed by a profile directory and two list files
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    profiles_dir: PathBuf,
    float_list: PathBuf,
    file_list: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(
        profiles_dir: impl Into<PathBuf>,
        float_list: impl Into<PathBuf>,
        file_list: impl Into<PathBuf>,
    ) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            float_list: float_list.into(),
            file_list: file_list.into(),
        }
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    pub fn file_list(&self) -> &Path {
        &self.file_list
    }
}

impl ProfileCatalog for DirectoryCatalog {
    fn list_candidates(&self) -> Result<Vec<String>> {
        let files = scan_profile_files(&self.profiles_dir)?;
        info!(
            "Discovered {} candidate profile files in {}",
            files.len(),
            self.profiles_dir.display()
        );
        Ok(files)
    }

    fn list_target_floats(&self) -> Result<BTreeSet<String>> {
        if !self.float_list.exists() {
            return Err(Error::file_not_found(self.float_list.display().to_string()));
        }
        let floats: BTreeSet<String> = read_id_list(&self.float_list)?.into_iter().collect();
        info!(
            "Loaded {} target floats from {}",
            floats.len(),
            self.float_list.display()
        );
        Ok(floats)
    }

    fn load_resolved(&self) -> Result<Option<Vec<String>>> {
        if !self.file_list.exists() {
            return Ok(None);
        }
        read_id_list(&self.file_list).map(Some)
    }

    fn save_resolved(&self, identifiers: &[String]) -> Result<()> {
        write_id_list(&self.file_list, identifiers)?;
        info!(
            "Saved {} resolved identifiers to {}",
            identifiers.len(),
            self.file_list.display()
        );
        Ok(())
    }
}

/// Reads profile files from disk, choosing the decoder by extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProfileSource;

impl FileProfileSource {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileSource for FileProfileSource {
    fn open(&self, identifier: &str) -> Result<ProfileFile> {
        let path = Path::new(identifier);
        if !path.exists() {
            return Err(Error::file_not_found(identifier));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => read_json_profile(path),
            #[cfg(feature = "netcdf")]
            Some("nc") => crate::app::adapters::netcdf_source::read_netcdf_profile(path),
            #[cfg(not(feature = "netcdf"))]
            Some("nc") => Err(Error::unsupported_format(
                identifier,
                "NetCDF support is not enabled (build with --features netcdf)",
            )),
            _ => Err(Error::unsupported_format(identifier, "unknown file extension")),
        }
    }
}

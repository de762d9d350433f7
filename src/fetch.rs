//! Access to kernel source files
//!
//! [`HttpFetcher`] downloads files from a raw source tree at a pinned tag
//! into a scratch directory that is removed when the fetcher is dropped.
//! [`LocalTree`] reads a kernel checkout on disk instead.

use crate::error::{GenerateError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// A kernel source tree files can be pulled from
pub trait SourceTree {
    /// Make `rel_path` available locally and return where it is
    fn fetch(&mut self, rel_path: &str) -> Result<PathBuf>;

    /// Human readable origin, used in log output
    fn describe(&self) -> String;
}

/// Downloads files over HTTP at a fixed kernel version
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    linux_version: String,
    scratch: TempDir,
    fetched: HashMap<String, PathBuf>,
}

impl HttpFetcher {
    pub fn new(base_url: &str, linux_version: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenerateError::HttpClient)?;
        Self::with_client(client, base_url, linux_version)
    }

    /// Use a preconfigured client (proxy settings, timeouts)
    pub fn with_client(
        client: reqwest::blocking::Client,
        base_url: &str,
        linux_version: &str,
    ) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("mksyscalls")
            .tempdir()
            .map_err(|e| GenerateError::io(std::env::temp_dir(), e))?;
        debug!(dir = %scratch.path().display(), "created scratch directory");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            linux_version: linux_version.trim_matches('/').to_string(),
            scratch,
            fetched: HashMap::new(),
        })
    }

    /// Full URL of `rel_path` at the configured version
    pub fn url_for(&self, rel_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.linux_version,
            rel_path.trim_start_matches('/')
        )
    }

    /// Directory downloads are written to
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }
}

/// Flatten a relative path into a single file name
///
/// Different architectures use files with the same basename
/// (`unistd.h`), so the whole path is kept.
fn scratch_name(rel_path: &str) -> String {
    rel_path.trim_start_matches('/').replace('/', "_")
}

impl SourceTree for HttpFetcher {
    fn fetch(&mut self, rel_path: &str) -> Result<PathBuf> {
        if let Some(path) = self.fetched.get(rel_path) {
            debug!(rel_path, "already downloaded");
            return Ok(path.clone());
        }

        let url = self.url_for(rel_path);
        info!(%url, "downloading");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| GenerateError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| GenerateError::Http {
            url: url.clone(),
            source,
        })?;

        let dest = self.scratch.path().join(scratch_name(rel_path));
        fs::write(&dest, &body).map_err(|e| GenerateError::io(&dest, e))?;
        debug!(dest = %dest.display(), bytes = body.len(), "saved");

        self.fetched.insert(rel_path.to_string(), dest.clone());
        Ok(dest)
    }

    fn describe(&self) -> String {
        format!("{} at {}", self.base_url, self.linux_version)
    }
}

/// Reads files straight from a kernel tree on disk
#[derive(Debug, Clone)]
pub struct LocalTree {
    root: PathBuf,
}

impl LocalTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceTree for LocalTree {
    fn fetch(&mut self, rel_path: &str) -> Result<PathBuf> {
        let path = self.root.join(rel_path.trim_start_matches('/'));
        if !path.is_file() {
            return Err(GenerateError::io(
                &path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        Ok(path)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

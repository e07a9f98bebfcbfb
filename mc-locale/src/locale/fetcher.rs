//! HTTP fetching for manifests, language files and the client archive
//!
//! This module provides:
//! - The [`HttpSource`] seam used by the resolver and manager
//! - A blocking reqwest implementation with timeout, size limit and proxy
//! - [`StubSource`], an in-memory source for tests and offline hosts
//! - Extraction of a single entry from a downloaded archive

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

use super::cache::temp_sibling;
use super::config::LocaleConfig;
use super::integrity::IntegrityError;

/// Blocking byte source for remote documents
///
/// Implementations must bound every request in time; a stuck request must
/// fail with [`FetchError::Timeout`] rather than block forever.
pub trait HttpSource: Send + Sync {
    /// Fetch the full body of `url`
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Download `url` into the file at `path`
    fn download_to(&self, url: &str, path: &Path) -> Result<(), FetchError> {
        let data = self.get(url)?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Fetches content over HTTP(S)
pub struct ReqwestSource {
    client: reqwest::blocking::Client,
    max_content_size: u64,
}

impl ReqwestSource {
    /// Create a new source from config
    ///
    /// The blocking client owns a runtime; build and drop it outside of
    /// async contexts.
    pub fn new(config: &LocaleConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "mc-locale/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ));

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            max_content_size: config.max_content_size,
        })
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status().as_u16()));
        }

        // Check content length before downloading
        if let Some(len) = response.content_length() {
            if len > self.max_content_size {
                return Err(FetchError::TooLarge {
                    size: len,
                    max: self.max_content_size,
                });
            }
        }

        Ok(response)
    }
}

impl HttpSource for ReqwestSource {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let data = self.send(url)?.bytes()?.to_vec();

        // Verify size after download (in case content-length was missing)
        if data.len() as u64 > self.max_content_size {
            return Err(FetchError::TooLarge {
                size: data.len() as u64,
                max: self.max_content_size,
            });
        }

        Ok(data)
    }

    fn download_to(&self, url: &str, path: &Path) -> Result<(), FetchError> {
        let response = self.send(url)?;
        let mut file = File::create(path)?;
        let written = io::copy(&mut response.take(self.max_content_size + 1), &mut file)?;

        if written > self.max_content_size {
            drop(file);
            let _ = fs::remove_file(path);
            return Err(FetchError::TooLarge {
                size: written,
                max: self.max_content_size,
            });
        }

        Ok(())
    }
}

/// In-memory source serving fixed bodies by URL
///
/// Unknown URLs answer with HTTP 404. Every request is counted so callers
/// can observe how often a document was fetched.
#[derive(Debug, Default)]
pub struct StubSource {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubSource {
    /// Create a source with no documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url` (builder form)
    pub fn with(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.set(url, body);
        self
    }

    /// Serve `body` at `url`, replacing any previous body
    pub fn set(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), body.into());
    }

    /// Stop serving `url`
    pub fn remove(&self, url: &str) {
        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
    }

    /// Number of requests made for `url`
    pub fn hits(&self, url: &str) -> usize {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Number of requests made for any URL
    pub fn total_hits(&self) -> usize {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }
}

impl HttpSource for StubSource {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        *self
            .hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_default() += 1;

        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .ok_or(FetchError::Http(404))
    }
}

/// Copy a single archive entry of at most `max_size` bytes into `out_path`
///
/// The output is written to a sibling temp file first and renamed into
/// place, so a failed extraction never leaves a truncated file behind.
pub fn extract_archive_entry(
    archive_path: &Path,
    entry: &str,
    out_path: &Path,
    max_size: u64,
) -> Result<(), FetchError> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;
    let source = archive.by_name(entry).map_err(|e| match e {
        ZipError::FileNotFound => FetchError::EntryMissing(entry.to_string()),
        other => FetchError::Archive(other),
    })?;

    let temp_path = temp_sibling(out_path);
    let mut out = File::create(&temp_path)?;
    let written = io::copy(&mut source.take(max_size + 1), &mut out)?;
    if written > max_size {
        drop(out);
        let _ = fs::remove_file(&temp_path);
        return Err(FetchError::TooLarge {
            size: written,
            max: max_size,
        });
    }

    out.sync_all()?;
    drop(out);
    fs::rename(&temp_path, out_path)?;
    Ok(())
}

/// Errors that can occur during content fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Network/request error
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Content too large
    #[error("Content too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// Downloaded content failed verification
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] ZipError),

    /// Archive does not contain the expected entry
    #[error("Archive entry missing: {0}")]
    EntryMissing(String),

    /// IO error while writing downloaded content
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else {
            FetchError::Network(e)
        }
    }
}

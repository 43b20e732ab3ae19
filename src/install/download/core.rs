//! Blocking download of the bootstrap installer with progress reporting

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use reqwest::blocking::Client;

use crate::install::error::NetworkFailure;

/// Emit progress at most every 256KB (plus once at the end)
const PROGRESS_THRESHOLD: u64 = 256 * 1024;
const CHUNK_SIZE: usize = 64 * 1024;

/// Bytes received so far for the artifact being fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    /// `None` when the server did not announce a length
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn fraction(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => Some((self.downloaded as f64 / total as f64) as f32),
            _ => None,
        }
    }
}

/// Retrieves a remote resource into a fresh local file
pub trait ArtifactFetcher {
    /// Blocks until `destination` holds the complete resource.
    ///
    /// Every failure, transport or local, is reported as a single
    /// [`NetworkFailure`]; nothing is retried.
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<(), NetworkFailure>;
}

/// [`ArtifactFetcher`] backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // No overall timeout: the installer is ~70MB and there is nothing to
        // fall back to if the transfer is cut short.
        let client = Client::builder()
            .user_agent(concat!("cnapy-installer/", env!("CARGO_PKG_VERSION")))
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<(), NetworkFailure> {
        let failure = |reason: String| NetworkFailure {
            url: url.to_string(),
            reason,
        };

        info!("Downloading {url} to {}", destination.display());

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {status}")));
        }

        let total = response.content_length();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .map_err(|e| failure(format!("cannot create {}: {e}", destination.display())))?;

        match stream_to_file(&mut response, &mut file, total, on_progress) {
            Ok(downloaded) => {
                debug!("Downloaded {downloaded} bytes from {url}");
                Ok(())
            }
            Err(reason) => {
                drop(file);
                if let Err(e) = fs::remove_file(destination) {
                    warn!(
                        "Could not remove partial download {}: {e}",
                        destination.display()
                    );
                }
                Err(failure(reason))
            }
        }
    }
}

fn stream_to_file(
    body: &mut impl Read,
    file: &mut File,
    total: Option<u64>,
    on_progress: &mut dyn FnMut(DownloadProgress),
) -> Result<u64, String> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut downloaded: u64 = 0;
    let mut last_reported: u64 = 0;

    on_progress(DownloadProgress { downloaded, total });

    loop {
        let read = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(format!("transfer interrupted after {downloaded} bytes: {e}")),
        };

        file.write_all(&buffer[..read])
            .map_err(|e| format!("cannot write downloaded data: {e}"))?;
        downloaded += read as u64;

        if downloaded - last_reported >= PROGRESS_THRESHOLD {
            on_progress(DownloadProgress { downloaded, total });
            last_reported = downloaded;
        }
    }

    if let Some(expected) = total
        && downloaded != expected
    {
        return Err(format!(
            "incomplete transfer: received {downloaded} of {expected} bytes"
        ));
    }

    file.sync_all()
        .map_err(|e| format!("cannot flush downloaded data: {e}"))?;

    if last_reported != downloaded {
        on_progress(DownloadProgress { downloaded, total });
    }
    Ok(downloaded)
}

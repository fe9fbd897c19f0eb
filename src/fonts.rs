/*
 *  fonts.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Fixed font download table and the fetch logic behind the
 *  fetch-fonts companion tool. Partial font sets are an accepted
 *  degraded mode, not an error state.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::{error, info, warn};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout; a stalled download delays only its own entry.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Font sources: target filename to direct download URL.
pub const FONT_SOURCES: &[(&str, &str)] = &[
    (
        "Roboto-Thin.ttf",
        "https://github.com/google/roboto/raw/main/src/hinted/Roboto-Thin.ttf",
    ),
    (
        "UbuntuMono-Regular.ttf",
        "https://github.com/google/fonts/raw/main/ufl/ubuntumono/UbuntuMono-Regular.ttf",
    ),
    (
        "DejaVuSansMono.ttf",
        "https://github.com/dejavu-fonts/dejavu-fonts/raw/master/ttf/DejaVuSansMono.ttf",
    ),
    (
        "SourceCodePro-Regular.ttf",
        "https://github.com/adobe-fonts/source-code-pro/raw/release/TTF/SourceCodePro-Regular.ttf",
    ),
    (
        "FiraMono-Regular.ttf",
        "https://github.com/mozilla/Fira/raw/master/ttf/FiraMono-Regular.ttf",
    ),
    (
        "DSEG7Classic-Regular.ttf",
        "https://github.com/keshikan/DSEG/raw/master/fonts/DSEG7-Classic/DSEG7Classic-Regular.ttf",
    ),
];

/// Font identifiers selectable in the settings panel (file stems of
/// the download table).
pub fn font_ids() -> Vec<String> {
    FONT_SOURCES
        .iter()
        .map(|(name, _)| name.trim_end_matches(".ttf").to_string())
        .collect()
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Target file already on disk; no network call made.
    AlreadyPresent,
    Downloaded,
}

/// Final tally for a fetch run.
#[derive(Debug, Clone, Copy)]
pub struct FetchReport {
    pub succeeded: usize,
    pub total: usize,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Build the HTTP client used for font downloads.
pub fn fetch_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(FETCH_TIMEOUT).build()
}

/// Fetch every entry of the font table into `fonts_dir`.
///
/// Failures are per-file: logged with detail, counted, and never abort
/// the remaining downloads.
pub async fn fetch_all(client: &Client, fonts_dir: &Path) -> FetchReport {
    info!("downloading fonts to {}", fonts_dir.display());

    if let Err(e) = std::fs::create_dir_all(fonts_dir) {
        error!("cannot create fonts directory {}: {}", fonts_dir.display(), e);
        return FetchReport {
            succeeded: 0,
            total: FONT_SOURCES.len(),
        };
    }

    let mut succeeded = 0;
    for (name, url) in FONT_SOURCES {
        match fetch_one(client, fonts_dir, name, url).await {
            Ok(FetchOutcome::AlreadyPresent) => {
                info!("✓ {} already exists, skipping", name);
                succeeded += 1;
            }
            Ok(FetchOutcome::Downloaded) => {
                info!("✓ {} downloaded successfully", name);
                succeeded += 1;
            }
            Err(e) => {
                error!("✗ failed to download {}: {}", name, e);
            }
        }
    }

    let report = FetchReport {
        succeeded,
        total: FONT_SOURCES.len(),
    };
    info!("{}/{} fonts downloaded successfully", report.succeeded, report.total);
    if !report.is_complete() {
        warn!("some fonts failed to download; the clock still works but those fonts won't be available");
    }
    report
}

/// Fetch a single font file. Skips with success when the target
/// already exists, without touching the network.
pub async fn fetch_one(
    client: &Client,
    fonts_dir: &Path,
    name: &str,
    url: &str,
) -> Result<FetchOutcome, FetchError> {
    let target = fonts_dir.join(name);
    if target.exists() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    info!("downloading {}...", name);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response.bytes().await?;
    std::fs::write(&target, &body)?;
    Ok(FetchOutcome::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("klokka-fonts-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_font_ids_strip_extension() {
        let ids = font_ids();
        assert_eq!(ids.len(), FONT_SOURCES.len());
        assert!(ids.contains(&"Roboto-Thin".to_string()));
        assert!(ids.contains(&"DSEG7Classic-Regular".to_string()));
        assert!(ids.iter().all(|id| !id.ends_with(".ttf")));
    }

    #[tokio::test]
    async fn test_existing_file_skips_network() {
        let dir = temp_dir("skip");
        std::fs::write(dir.join("Roboto-Thin.ttf"), b"stub").unwrap();

        // The unroutable URL proves no request is attempted.
        let client = fetch_client().unwrap();
        let outcome = fetch_one(&client, &dir, "Roboto-Thin.ttf", "http://127.0.0.1:1/nope")
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_unreachable_source_is_per_file_error() {
        let dir = temp_dir("unreachable");

        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let result = fetch_one(&client, &dir, "Missing.ttf", "http://127.0.0.1:1/nope").await;

        assert!(result.is_err());
        assert!(!dir.join("Missing.ttf").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}

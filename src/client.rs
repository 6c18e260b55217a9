//! HTTP access to the exo.MAST archive.
//!
//! Every operation here is one independent GET against the versioned API
//! base. The client keeps no state between calls, so a single instance can
//! be cloned cheaply and shared across threads; each call owns its own
//! request and response buffers.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::dvdata::{Collection, DvTarget};
use crate::error::{Error, Result};
use crate::identifiers::{self, IdentifierRecord};
use crate::properties::{self, PlanetProperties};
use crate::spectra::{self, SpectraFileList, SpectrumSample};

/// Default base endpoint for the versioned exo.MAST API.
pub const DEFAULT_API_URL: &str = "https://exo.mast.stsci.edu/api/v0.1";

/// Stateless client for the exo.MAST archive.
#[derive(Debug, Clone)]
pub struct ExomastClient {
    http: Client,
    base_url: String,
}

impl ExomastClient {
    /// Build a client against the default archive endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Build a client against an alternate base URL (mirrors, local test
    /// servers). Trailing slashes are ignored.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(Error::Transport)?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// Base URL this client issues requests against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a target name into its identifier record.
    ///
    /// The name is trimmed before transmission; an empty name fails before
    /// any request is issued, as does a zero timeout. An unknown name maps
    /// to [`Error::TargetNotFound`]; a body missing `canonicalName` or
    /// `starName` maps to [`Error::MalformedResponse`] and never yields a
    /// partially populated record.
    pub fn lookup(&self, name: &str, timeout: Duration) -> Result<IdentifierRecord> {
        let target = validated_name(name)?;
        let (_, record) = self.fetch_identifiers(target, timeout)?;
        Ok(record)
    }

    /// Same exchange as [`lookup`](Self::lookup), additionally writing the
    /// raw response body to `path` (UTF-8 JSON text, silently overwriting).
    ///
    /// The file is written only after the body parses, so a failed lookup
    /// leaves no file behind.
    pub fn lookup_and_save(
        &self,
        name: &str,
        timeout: Duration,
        path: &Path,
    ) -> Result<IdentifierRecord> {
        let target = validated_name(name)?;
        let (body, record) = self.fetch_identifiers(target, timeout)?;
        write_atomic(path, body.as_bytes())?;
        info!(name = target, path = %path.display(), "saved raw identifier response");
        Ok(record)
    }

    /// Properties of the first planet entry reported for a target.
    pub fn properties(&self, name: &str, timeout: Duration) -> Result<PlanetProperties> {
        self.properties_at(name, 0, timeout)
    }

    /// Properties of the planet entry at `index` in the response list.
    ///
    /// The archive answers with one entry per known planet of the target;
    /// an index past the end is an explicit error.
    pub fn properties_at(
        &self,
        name: &str,
        index: usize,
        timeout: Duration,
    ) -> Result<PlanetProperties> {
        let target = validated_name(name)?;
        let url = format!(
            "{}/exoplanets/{}/properties",
            self.base_url,
            url_name(target)
        );
        let body = self.fetch_text(&url, &[], timeout, target)?;
        let entries = properties::parse_response(&url, &body)?;
        if entries.is_empty() {
            return Err(Error::TargetNotFound {
                name: target.to_string(),
            });
        }
        let len = entries.len();
        entries
            .into_iter()
            .nth(index)
            .ok_or(Error::RecordIndexOutOfRange { index, len })
    }

    /// Listing of transmission-spectrum files available for a target.
    pub fn spectra_filelist(&self, name: &str, timeout: Duration) -> Result<SpectraFileList> {
        let target = validated_name(name)?;
        let url = format!("{}/spectra/{}/filelist/", self.base_url, url_name(target));
        let body = self.fetch_text(&url, &[], timeout, target)?;
        spectra::parse_filelist(&url, &body)
    }

    /// Fetch and parse one transmission-spectrum table by file name.
    pub fn spectrum(
        &self,
        name: &str,
        filename: &str,
        timeout: Duration,
    ) -> Result<Vec<SpectrumSample>> {
        let target = validated_name(name)?;
        let url = format!(
            "{}/spectra/{}/file/{}",
            self.base_url,
            url_name(target),
            filename
        );
        let body = self.fetch_text(&url, &[], timeout, target)?;
        spectra::parse_table(&url, &body)
    }

    /// Prebuilt spectra plot payload for a target, passed through verbatim.
    pub fn spectra_plot(&self, name: &str, timeout: Duration) -> Result<Value> {
        let target = validated_name(name)?;
        let url = format!("{}/spectra/{}/plot/", self.base_url, url_name(target));
        self.fetch_json(&url, &[], timeout, target)
    }

    /// Threshold crossing events on file for a Kepler/TESS target.
    pub fn tce_listing(&self, target: &DvTarget, timeout: Duration) -> Result<Value> {
        let url = format!(
            "{}/dvdata/{}/{}/tces/",
            self.base_url,
            target.collection(),
            target.catalog_id()
        );
        self.fetch_json(&url, &[], timeout, &target.to_string())
    }

    /// Data-validation metadata for one threshold crossing event.
    pub fn dv_metadata(&self, target: &DvTarget, tce: u32, timeout: Duration) -> Result<Value> {
        let url = format!(
            "{}/dvdata/{}/{}/info/",
            self.base_url,
            target.collection(),
            target.catalog_id()
        );
        let tce_param = tce.to_string();
        self.fetch_json(&url, &[("tce", tce_param.as_str())], timeout, &target.to_string())
    }

    /// Collection-wide data-validation metadata (no specific target).
    pub fn collection_metadata(&self, collection: Collection, timeout: Duration) -> Result<Value> {
        let url = format!("{}/dvdata/{}/info", self.base_url, collection);
        self.fetch_json(&url, &[], timeout, collection.as_str())
    }

    /// Data-validation light-curve table for one threshold crossing event.
    pub fn dv_table(&self, target: &DvTarget, tce: u32, timeout: Duration) -> Result<Value> {
        let url = format!(
            "{}/dvdata/{}/{}/table/",
            self.base_url,
            target.collection(),
            target.catalog_id()
        );
        let tce_param = tce.to_string();
        self.fetch_json(&url, &[("tce", tce_param.as_str())], timeout, &target.to_string())
    }

    /// Phase-folded plot payload for one threshold crossing event, passed
    /// through verbatim. `embed` requests the embeddable variant.
    pub fn dv_phase_plot(
        &self,
        target: &DvTarget,
        tce: u32,
        embed: bool,
        timeout: Duration,
    ) -> Result<Value> {
        let url = format!(
            "{}/dvdata/{}/{}/phaseplot/",
            self.base_url,
            target.collection(),
            target.catalog_id()
        );
        let tce_param = tce.to_string();
        let mut query: Vec<(&str, &str)> = vec![("tce", tce_param.as_str())];
        if embed {
            query.push(("embed", ""));
        }
        self.fetch_json(&url, &query, timeout, &target.to_string())
    }

    fn fetch_identifiers(
        &self,
        target: &str,
        timeout: Duration,
    ) -> Result<(String, IdentifierRecord)> {
        let url = format!("{}/exoplanets/identifiers/", self.base_url);
        let body = self.fetch_text(&url, &[("name", target)], timeout, target)?;
        if body.trim().is_empty() {
            // The archive answers unknown names with an empty 200 body.
            return Err(Error::TargetNotFound {
                name: target.to_string(),
            });
        }
        let record = identifiers::parse_response(&url, &body)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::TargetNotFound {
                name: target.to_string(),
            })?;
        Ok((body, record))
    }

    fn fetch_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
        target: &str,
    ) -> Result<String> {
        if timeout.is_zero() {
            return Err(Error::ExpiredTimeout);
        }

        debug!(%url, name = target, "querying exo.MAST");
        let mut request = self.http.get(url).timeout(timeout);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().map_err(Error::Transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::TargetNotFound {
                name: target.to_string(),
            });
        }
        let response = response.error_for_status().map_err(Error::Transport)?;
        response.text().map_err(Error::Transport)
    }

    fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
        target: &str,
    ) -> Result<Value> {
        let body = self.fetch_text(url, query, timeout, target)?;
        serde_json::from_str(&body).map_err(|err| Error::MalformedResponse {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

fn user_agent() -> String {
    format!(
        "exomast-client/{version}",
        version = env!("CARGO_PKG_VERSION")
    )
}

fn validated_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyTargetName);
    }
    Ok(trimmed)
}

/// Encode a target name for use as a URL path segment.
fn url_name(name: &str) -> String {
    name.replace(' ', "%20")
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

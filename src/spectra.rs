//! Transmission-spectrum listings and tables.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Listing of spectrum files available for a target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpectraFileList {
    /// File names accepted by the spectra file endpoint.
    #[serde(default)]
    pub filenames: Vec<String>,
}

/// One row of a transmission-spectrum table.
///
/// Tables are served as whitespace-separated text with four columns:
/// band center, band width, transit depth `(Rp/Rs)^2`, and its
/// one-sigma uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumSample {
    /// Band center in microns.
    pub wavelength_microns: f64,
    /// Band width in microns.
    pub bandwidth_microns: f64,
    /// Transit depth for the band.
    pub transit_depth: f64,
    /// One-sigma uncertainty on the transit depth.
    pub uncertainty: f64,
}

pub(crate) fn parse_filelist(url: &str, body: &str) -> Result<SpectraFileList> {
    serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Parse a spectrum table body, skipping `#` comments and blank lines.
pub(crate) fn parse_table(url: &str, body: &str) -> Result<Vec<SpectrumSample>> {
    let mut samples = Vec::new();

    for (line_index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != 4 {
            return Err(Error::MalformedResponse {
                url: url.to_string(),
                message: format!(
                    "expected 4 columns on line {}, found {}",
                    line_index + 1,
                    columns.len()
                ),
            });
        }

        let mut parsed = [0.0f64; 4];
        for (slot, column) in parsed.iter_mut().zip(columns.iter()) {
            *slot = column.parse::<f64>().map_err(|err| Error::MalformedResponse {
                url: url.to_string(),
                message: format!("invalid number '{}' on line {}: {}", column, line_index + 1, err),
            })?;
        }

        samples.push(SpectrumSample {
            wavelength_microns: parsed[0],
            bandwidth_microns: parsed[1],
            transit_depth: parsed[2],
            uncertainty: parsed[3],
        });
    }

    Ok(samples)
}

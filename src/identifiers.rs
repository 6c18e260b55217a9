//! Identifier resolution for archive targets.
//!
//! The identifiers endpoint maps a target name onto its canonical
//! designation, host star, celestial coordinates, and catalog
//! cross-identifiers. The response uses camelCase keys and may wrap the
//! record in a one-element array when a name matches more than one entry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resolved identifiers for a single archive target.
///
/// Constructed atomically from one parsed response body and never mutated
/// afterwards. All fields except [`canonical_name`](Self::canonical_name)
/// and [`star_name`](Self::star_name) may be absent because the upstream
/// catalog does not guarantee coverage for every mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    /// Disambiguated target name.
    pub canonical_name: String,
    /// Host star designation.
    pub star_name: String,
    /// Right ascension in degrees, `[0, 360)`.
    pub right_ascension: Option<f64>,
    /// Declination in degrees, `[-90, 90]`.
    pub declination: Option<f64>,
    /// Catalog cross-identifiers, ordered as received. May be empty and may
    /// duplicate the canonical name.
    pub alternate_names: Vec<String>,
    /// Kepler Input Catalog identifier, when the target has one.
    pub kepler_id: Option<i64>,
    /// Number of Kepler threshold crossing events on file.
    pub kepler_tce_count: Option<i64>,
    /// TESS Input Catalog identifier, when the target has one.
    pub tess_id: Option<i64>,
    /// Number of TESS threshold crossing events on file.
    pub tess_tce_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawIdentifiers {
    #[serde(rename = "canonicalName")]
    canonical_name: Option<String>,
    #[serde(rename = "starName")]
    star_name: Option<String>,
    ra: Option<f64>,
    dec: Option<f64>,
    #[serde(rename = "planetNames")]
    planet_names: Option<Vec<String>>,
    #[serde(rename = "keplerID")]
    kepler_id: Option<i64>,
    #[serde(rename = "keplerTCE")]
    kepler_tce: Option<i64>,
    #[serde(rename = "tessID")]
    tess_id: Option<i64>,
    #[serde(rename = "tessTCE")]
    tess_tce: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdentifiersBody {
    Many(Vec<RawIdentifiers>),
    One(Box<RawIdentifiers>),
}

/// Parse an identifiers response body into records.
///
/// Returns an empty vector when the archive answered with an empty array;
/// the caller decides whether that means the target is unknown.
pub(crate) fn parse_response(url: &str, body: &str) -> Result<Vec<IdentifierRecord>> {
    let parsed: IdentifiersBody =
        serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
            url: url.to_string(),
            message: err.to_string(),
        })?;

    let raw_records = match parsed {
        IdentifiersBody::Many(records) => records,
        IdentifiersBody::One(record) => vec![*record],
    };

    raw_records
        .into_iter()
        .map(|raw| build_record(url, raw))
        .collect()
}

fn build_record(url: &str, raw: RawIdentifiers) -> Result<IdentifierRecord> {
    let canonical_name = required_field(url, "canonicalName", raw.canonical_name)?;
    let star_name = required_field(url, "starName", raw.star_name)?;

    Ok(IdentifierRecord {
        canonical_name,
        star_name,
        right_ascension: raw.ra,
        declination: raw.dec,
        alternate_names: raw.planet_names.unwrap_or_default(),
        kepler_id: raw.kepler_id,
        kepler_tce_count: raw.kepler_tce,
        tess_id: raw.tess_id,
        tess_tce_count: raw.tess_tce,
    })
}

fn required_field(url: &str, field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MalformedResponse {
            url: url.to_string(),
            message: format!("response is missing required field {field}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://exo.mast.stsci.edu/api/v0.1/exoplanets/identifiers/";

    #[test]
    fn parses_single_object_body() {
        let body = r#"{
            "canonicalName": "HAT-P-26 b",
            "starName": "HAT-P-26",
            "ra": 213.1563,
            "dec": 4.0603,
            "planetNames": ["HAT-P-26 b", "TOI-1186 b"],
            "keplerID": null,
            "keplerTCE": null,
            "tessID": 158002130,
            "tessTCE": 1
        }"#;

        let records = parse_response(URL, body).expect("body parses");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.canonical_name, "HAT-P-26 b");
        assert_eq!(record.star_name, "HAT-P-26");
        assert_eq!(record.alternate_names.len(), 2);
        assert_eq!(record.kepler_id, None);
        assert_eq!(record.tess_id, Some(158002130));
        assert_eq!(record.tess_tce_count, Some(1));
    }

    #[test]
    fn parses_array_body_preserving_order() {
        let body = r#"[
            {"canonicalName": "Kepler-90 b", "starName": "Kepler-90"},
            {"canonicalName": "Kepler-90 c", "starName": "Kepler-90"}
        ]"#;

        let records = parse_response(URL, body).expect("body parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].canonical_name, "Kepler-90 b");
        assert_eq!(records[1].canonical_name, "Kepler-90 c");
    }

    #[test]
    fn absent_optionals_map_to_none() {
        let body = r#"{"canonicalName": "GJ 1214 b", "starName": "GJ 1214", "planetNames": null}"#;

        let records = parse_response(URL, body).expect("body parses");
        let record = &records[0];
        assert_eq!(record.right_ascension, None);
        assert_eq!(record.declination, None);
        assert!(record.alternate_names.is_empty());
        assert_eq!(record.kepler_id, None);
        assert_eq!(record.kepler_tce_count, None);
        assert_eq!(record.tess_id, None);
        assert_eq!(record.tess_tce_count, None);
    }

    #[test]
    fn missing_canonical_name_is_malformed() {
        let body = r#"{"starName": "HD 189733", "ra": 300.18}"#;

        let err = parse_response(URL, body).expect_err("parse fails");
        match err {
            Error::MalformedResponse { message, .. } => {
                assert!(message.contains("canonicalName"), "message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_star_name_is_malformed() {
        let body = r#"{"canonicalName": "HD 189733 b"}"#;

        let err = parse_response(URL, body).expect_err("parse fails");
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_response(URL, "<html>busy</html>").expect_err("parse fails");
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn empty_array_yields_no_records() {
        let records = parse_response(URL, "[]").expect("body parses");
        assert!(records.is_empty());
    }
}

//! Planetary property records.
//!
//! The properties endpoint reports one loosely-schemed object per known
//! planet of a target. A handful of keys are stable enough to surface as
//! typed fields; everything else stays available through the raw value map.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Physical constants used to derive the planet/star radius ratio.
pub mod constants {
    /// IAU nominal equatorial radius of Jupiter (meters).
    pub const JUPITER_RADIUS_M: f64 = 7.1492e7;

    /// IAU nominal solar radius (meters).
    pub const SOLAR_RADIUS_M: f64 = 6.957e8;
}

/// Properties reported for a single planet.
///
/// Immutable once parsed. Typed fields are `None` when the archive omitted
/// the key or reported a non-numeric value; the full response entry remains
/// accessible through [`value`](Self::value) and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetProperties {
    /// Orbital period in days (`orbital_period`).
    pub orbital_period_days: Option<f64>,
    /// Planet radius in Jupiter radii (`Rp`).
    pub planet_radius_jupiter: Option<f64>,
    /// Stellar radius in solar radii (`Rs`).
    pub stellar_radius_solar: Option<f64>,
    /// Transit depth (`transit_depth`).
    pub transit_depth: Option<f64>,
    /// Planet/star radius ratio: the archive's `Rp/Rs` when present,
    /// otherwise derived from `Rp` and `Rs` via the nominal radii.
    pub radius_ratio: Option<f64>,
    values: BTreeMap<String, Value>,
}

impl PlanetProperties {
    fn from_map(values: BTreeMap<String, Value>) -> Self {
        let orbital_period_days = number_value(&values, "orbital_period");
        let planet_radius_jupiter = number_value(&values, "Rp");
        let stellar_radius_solar = number_value(&values, "Rs");
        let transit_depth = number_value(&values, "transit_depth");
        let radius_ratio = number_value(&values, "Rp/Rs")
            .or_else(|| derived_radius_ratio(planet_radius_jupiter, stellar_radius_solar));

        Self {
            orbital_period_days,
            planet_radius_jupiter,
            stellar_radius_solar,
            transit_depth,
            radius_ratio,
            values,
        }
    }

    /// Raw value for `key`, exactly as the archive returned it.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Numeric value for `key`, when present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        number_value(&self.values, key)
    }

    /// Textual value for `key`, when present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Keys reported by the archive, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}

fn number_value(values: &BTreeMap<String, Value>, key: &str) -> Option<f64> {
    values.get(key).and_then(Value::as_f64)
}

fn derived_radius_ratio(rp_jupiter: Option<f64>, rs_solar: Option<f64>) -> Option<f64> {
    let rp = rp_jupiter?;
    let rs = rs_solar?;
    if rs <= 0.0 {
        return None;
    }
    Some(rp * constants::JUPITER_RADIUS_M / (rs * constants::SOLAR_RADIUS_M))
}

/// Parse a properties response body into one record per planet entry.
pub(crate) fn parse_response(url: &str, body: &str) -> Result<Vec<PlanetProperties>> {
    let parsed: Value = serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(_) => vec![parsed],
        other => {
            return Err(Error::MalformedResponse {
                url: url.to_string(),
                message: format!("expected property objects, got {other}"),
            })
        }
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(map) => Ok(PlanetProperties::from_map(map.into_iter().collect())),
            other => Err(Error::MalformedResponse {
                url: url.to_string(),
                message: format!("expected a property object, got {other}"),
            }),
        })
        .collect()
}

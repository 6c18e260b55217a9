//! Addressing for Kepler/TESS data-validation products.
//!
//! The dvdata endpoints are keyed by survey collection and input-catalog
//! identifier rather than by planet name. Targets named with a `KIC` or
//! `TIC` prefix can be addressed directly; anything else must go through
//! identifier resolution first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Survey collection a data-validation product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Kepler,
    Tess,
}

impl Collection {
    /// Path segment used by the dvdata endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Kepler => "kepler",
            Collection::Tess => "tess",
        }
    }

    /// Input-catalog prefix conventionally used in target names.
    pub fn catalog_prefix(self) -> &'static str {
        match self {
            Collection::Kepler => "KIC",
            Collection::Tess => "TIC",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input-catalog target addressable through the dvdata endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DvTarget {
    collection: Collection,
    catalog_id: u64,
}

impl DvTarget {
    /// Address a target directly by collection and catalog identifier.
    pub fn new(collection: Collection, catalog_id: u64) -> Self {
        Self {
            collection,
            catalog_id,
        }
    }

    /// Detect the collection and catalog identifier from a `KIC`/`TIC`
    /// prefixed target name (case-insensitive, optional space before the
    /// digits, trailing components ignored).
    pub fn from_name(name: &str) -> Result<Self> {
        parse_catalog_name(name).ok_or_else(|| Error::UnsupportedCollection {
            name: name.trim().to_string(),
        })
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn catalog_id(&self) -> u64 {
        self.catalog_id
    }
}

impl fmt::Display for DvTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.collection.catalog_prefix(), self.catalog_id)
    }
}

fn parse_catalog_name(name: &str) -> Option<DvTarget> {
    let lower = name.trim().to_ascii_lowercase();
    let (collection, rest) = if let Some(rest) = lower.strip_prefix("kic") {
        (Collection::Kepler, rest)
    } else if let Some(rest) = lower.strip_prefix("tic") {
        (Collection::Tess, rest)
    } else {
        return None;
    };

    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }

    let catalog_id = digits.parse().ok()?;
    Some(DvTarget::new(collection, catalog_id))
}

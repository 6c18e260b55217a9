//! Typed client for the STScI exo.MAST exoplanet archive API.
//!
//! This crate exposes a stateless [`ExomastClient`] that resolves
//! human-readable target names into immutable records: catalog identifiers,
//! planetary properties, transmission-spectrum tables, and Kepler/TESS
//! data-validation products. Each operation is a single independent
//! request/response exchange; no state is carried between calls and nothing
//! is persisted unless the caller explicitly asks for it via
//! [`ExomastClient::lookup_and_save`] or the [`LookupStore`].
//!

#![deny(warnings)]

pub mod client;
pub mod dvdata;
pub mod error;
pub mod identifiers;
pub mod properties;
pub mod report;
pub mod spectra;
pub mod store;

pub use client::{ExomastClient, DEFAULT_API_URL};
pub use dvdata::{Collection, DvTarget};
pub use error::{Error, Result};
pub use identifiers::IdentifierRecord;
pub use properties::PlanetProperties;
pub use report::{render_identifiers, render_properties, ReportOptions, ReportStyle};
pub use spectra::{SpectraFileList, SpectrumSample};
pub use store::LookupStore;

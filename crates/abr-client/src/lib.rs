//! Client side of the ABR lookup.
//!
//! [`HttpRegistry`] speaks to the ABR XML search web service; [`Lookup`]
//! drives any [`abr_core::registry::Registry`] through sanitisation, XML
//! parsing and mapping to produce [`abr_core::lookup::LookupResult`]s.
//!
//! ```rust,ignore
//! let registry = HttpRegistry::new(ClientConfig { guid, ..Default::default() })?;
//! let result = Lookup::new(registry).lookup_abn("53 004 085 616").await?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod canned;
pub mod client;
pub mod error;
pub mod lookup;

pub use canned::CannedRegistry;
pub use client::{ClientConfig, DEFAULT_BASE_URL, HttpRegistry};
pub use error::{Error, Result};
pub use lookup::Lookup;

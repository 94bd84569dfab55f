//! Definition of the CZML output format and of the scene input format.
//!
//! A scene (see `scene.rs`) lists ground stations and planes; each one is turned into an
//! `Entity` which knows how to build its own CZML shapes.  A `Document` then gathers all the
//! entities under a single clock and serializes them as a CZML packet list.
//!
//! Example:
//! ```no_run
//! # fn main() -> eyre::Result<()> {
//! use chrono::{TimeZone, Utc};
//! use satczml_formats::{Document, Entity, GroundStation, Plane, Sample};
//!
//! let start = Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap();
//! let coords: Vec<Sample> = vec![(1.36, 43.63, 150.).into(), (2.55, 49.01, 120.).into()];
//!
//! let entities: Vec<Entity> = vec![
//!     GroundStation::builder("TLS", 1.36, 43.63, 150., start).build()?.into(),
//!     Plane::builder("AF123", &coords, start).build()?.into(),
//! ];
//! let czml = Document::new(&entities).multiplier(60.).to_json(true)?;
//! println!("{czml}");
//! # Ok(())
//! # }
//! ```
//!

// Re-export for convenience
//
pub use document::*;
pub use entity::*;
pub use error::*;
pub use interval::*;
pub use packet::*;
pub use sample::*;
pub use scene::*;
pub use trajectory::*;

mod document;
mod entity;
mod error;
mod interval;
mod packet;
mod sample;
mod scene;
mod trajectory;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

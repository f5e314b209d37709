//! Static map snapshots of nearby stops.
//!
//! Renders an origin point and a list of stops as markers on a single
//! raster image fetched from a static map service (Google Static Maps by
//! default).

mod client;
mod error;

pub use client::{CANVAS_SIZE, SnapshotBuilder, SnapshotConfig, encode_png_base64, marker_params};
pub use error::SnapshotError;

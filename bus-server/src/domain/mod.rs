//! Domain types for the bus stop service.
//!
//! Coordinates validate on construction; stops and lines come from the
//! stop dataset and are treated as immutable values.

mod coordinate;
mod schedule;
mod stop;

pub use coordinate::{Coordinate, EARTH_RADIUS_METERS, InvalidCoordinate, distance_meters};
pub use schedule::{Schedule, StopSchedule};
pub use stop::{Line, Stop};

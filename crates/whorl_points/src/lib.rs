//! Point cloud data model and simulation
//!
//! This crate owns the animated dataset for Whorl: points expressed in polar
//! coordinates, the per-frame advancement rule, and the viewport mapping that
//! every render backend shares.
//!
//! ## Key Components
//!
//! - [`PolarPoint`] - a point as (radius, theta) plus the shared projection
//!   to cartesian pixel offsets
//! - [`PointCloud`] - the owned collection, random initialization and the
//!   per-frame advance
//! - [`Viewport`] - drawing region derived once from the startup window size

pub mod cloud;
pub mod point;
pub mod viewport;

pub use cloud::PointCloud;
pub use point::{PolarPoint, DEGREE_TO_RADIAN};
pub use viewport::Viewport;

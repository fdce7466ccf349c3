//! Rendering backends for the Whorl point demo
//!
//! This crate draws the animated point cloud through one of three
//! interchangeable backends, all consuming the same point set and the same
//! polar-to-cartesian mapping:
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`mode::ViewMode`] - the three-way backend selection and its cycle
//! - [`backend::RenderBackend`] - the common draw contract, with
//!   [`backend::VectorBackend`] (per-frame SVG document, rasterized),
//!   [`backend::RasterBackend`] (CPU pixel buffer, one painted circle per
//!   point) and [`backend::AcceleratedBackend`] (instanced GPU point layer)
//!
//! CPU-produced frames reach the window surface through an internal blit
//! pipeline; the accelerated backend draws directly.

pub mod backend;
pub mod context;
pub mod mode;

mod blit;

pub use backend::{
    create_backend, AcceleratedBackend, BackendSettings, RasterBackend, RenderBackend,
    RenderError, VectorBackend,
};
pub use context::RenderContext;
pub use mode::ViewMode;

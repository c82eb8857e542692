//! # Streamline Geometry
//!
//! CPU-side geometry construction for the Streamline map renderer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`AttributeBuffer`] - Typed, homogeneous vertex attribute storage
//! - [`PolylineDescriptor`] - Validated tessellation input
//! - [`PolylineMesh`] - Indexed triangle mesh for screen-space wide lines
//!
//! The central operation is [`PolylineDescriptor::create_geometry`], which
//! expands an ordered sequence of 3D positions into one quad per segment.
//! The mesh carries previous/next positions and a signed expansion side per
//! vertex so the vertex shader can offset the line perpendicular to its
//! screen-space direction, keeping a constant pixel width at any viewing
//! distance.
//!
//! ## Example
//!
//! ```
//! use streamline_geometry::math::Vec3;
//! use streamline_geometry::PolylineDescriptor;
//!
//! let mesh = PolylineDescriptor::new(vec![
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(2.0, 0.0, 0.0),
//! ])
//! .with_width(10.0)
//! .create_geometry()
//! .unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 8);
//! assert_eq!(mesh.indices().len(), 12);
//! ```

pub mod attribute;
pub mod error;
pub mod math;
pub mod polyline;

pub use attribute::{AttributeBuffer, AttributeValues, ComponentDatatype};
pub use error::{GeometryError, GeometryResult};
pub use polyline::{
    IndexData, IndexFormat, PolylineChannels, PolylineDescriptor, PolylineMesh, attribute_names,
};

/// Geometry library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the geometry subsystem.
pub fn init() {
    log::info!("Streamline Geometry v{} initialized", VERSION);
}

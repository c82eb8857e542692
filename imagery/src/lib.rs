//! # Streamline Imagery
//!
//! Tile imagery sources for the Streamline map renderer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GeographicTilingScheme`] - EPSG:4326 tile/rectangle mapping
//! - [`WmsSource`] - WMS `GetMap` request-URL composition
//! - [`ImageryProvider`] - Fire-and-forget tile request boundary
//! - [`ErrorEvent`] - Subscribable channel for asynchronous tile failures
//!
//! Tile fetching is fire-and-forget: [`ImageryProvider::request_image`]
//! either accepts a request or answers [`RequestOutcome::RetryLater`] when
//! too many requests are already in flight. There is no queue; the caller
//! re-issues the request on a later frame. Failures are delivered through
//! the provider's [`ErrorEvent`] channel rather than a return value, since
//! they arrive outside the call that triggered them.

pub mod provider;
pub mod tiling;
pub mod wms;

pub use provider::{
    ErrorEvent, ImageryProvider, RequestId, RequestOutcome, SubscriptionId, TileError,
    TileErrorKind, WmsImageryProvider,
};
pub use tiling::{GeographicTilingScheme, Rectangle};
pub use wms::WmsSource;

/// Imagery library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the imagery subsystem.
pub fn init() {
    log::info!("Streamline Imagery v{} initialized", VERSION);
}

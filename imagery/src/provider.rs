//! The tile request boundary: fire-and-forget requests with backpressure
//! and an observer channel for asynchronous failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

use crate::wms::WmsSource;

/// Whether a tile failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileErrorKind {
    /// Transient condition (timeout, throttling); retry on a later frame.
    Transient,
    /// Terminal condition (bad layer, authorization); retrying cannot help.
    Terminal,
}

/// A tile request failure, delivered through [`ErrorEvent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("tile {level}/{x}/{y} failed ({kind:?}): {message}")]
pub struct TileError {
    pub x: u32,
    pub y: u32,
    pub level: u32,
    pub kind: TileErrorKind,
    pub message: String,
}

/// Identifies an in-flight tile request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Identifies an [`ErrorEvent`] subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of [`ImageryProvider::request_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was accepted and is now in flight.
    InFlight(RequestId),
    /// Too many requests are already in flight; re-issue on a later frame.
    RetryLater,
}

type Listener = Box<dyn Fn(&TileError) + Send + Sync>;

/// Subscribable channel for tile failures.
///
/// Failures arrive outside the call that triggered them, so they are
/// delivered to subscribers instead of being returned. Listeners run on
/// the thread that raises the event.
#[derive(Default)]
pub struct ErrorEvent {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl ErrorEvent {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns the id needed to unsubscribe.
    pub fn subscribe(&self, listener: impl Fn(&TileError) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    /// Remove a listener. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id.0);
        listeners.len() != before
    }

    /// Deliver an error to every current subscriber.
    pub fn raise(&self, error: &TileError) {
        for (_, listener) in self.listeners.lock().iter() {
            listener(error);
        }
    }

    /// Number of current subscribers.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl std::fmt::Debug for ErrorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorEvent")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// The boundary a tile consumer programs against.
pub trait ImageryProvider {
    /// Build the request URL for tile `(x, y)` at `level`.
    fn build_request_url(&self, x: u32, y: u32, level: u32) -> String;

    /// Start fetching tile `(x, y)` at `level`, or signal backpressure.
    fn request_image(&mut self, x: u32, y: u32, level: u32) -> RequestOutcome;

    /// The channel on which this provider reports tile failures.
    fn error_events(&self) -> &ErrorEvent;
}

/// WMS-backed provider with an in-flight request cap.
///
/// Transport is out of scope here: a fetch backend issues the URL from
/// [`WmsSource::build_request_url`] and settles the request through
/// [`complete`](Self::complete) or [`fail`](Self::fail). The cap gives the
/// "retry later" backpressure signal instead of queuing.
pub struct WmsImageryProvider {
    source: WmsSource,
    max_in_flight: usize,
    in_flight: HashMap<u64, (u32, u32, u32)>,
    next_request: u64,
    errors: ErrorEvent,
}

impl WmsImageryProvider {
    pub const DEFAULT_MAX_IN_FLIGHT: usize = 6;

    /// Create a provider over `source` with the default in-flight cap.
    pub fn new(source: WmsSource) -> Self {
        Self {
            source,
            max_in_flight: Self::DEFAULT_MAX_IN_FLIGHT,
            in_flight: HashMap::new(),
            next_request: 0,
            errors: ErrorEvent::new(),
        }
    }

    /// Set the in-flight request cap.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Number of requests currently in flight.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Settle a request that delivered its image.
    ///
    /// Returns false if the id was not in flight.
    pub fn complete(&mut self, id: RequestId) -> bool {
        self.in_flight.remove(&id.0).is_some()
    }

    /// Settle a request that failed, reporting it on the error channel.
    pub fn fail(&mut self, id: RequestId, kind: TileErrorKind, message: impl Into<String>) -> bool {
        let Some((x, y, level)) = self.in_flight.remove(&id.0) else {
            return false;
        };
        let error = TileError {
            x,
            y,
            level,
            kind,
            message: message.into(),
        };
        log::warn!("{error}");
        self.errors.raise(&error);
        true
    }
}

impl ImageryProvider for WmsImageryProvider {
    fn build_request_url(&self, x: u32, y: u32, level: u32) -> String {
        self.source.build_request_url(x, y, level)
    }

    fn request_image(&mut self, x: u32, y: u32, level: u32) -> RequestOutcome {
        if self.in_flight.len() >= self.max_in_flight {
            log::trace!(
                "tile {level}/{x}/{y} deferred: {} requests in flight",
                self.in_flight.len()
            );
            return RequestOutcome::RetryLater;
        }
        let id = self.next_request;
        self.next_request += 1;
        self.in_flight.insert(id, (x, y, level));
        RequestOutcome::InFlight(RequestId(id))
    }

    fn error_events(&self) -> &ErrorEvent {
        &self.errors
    }
}

impl std::fmt::Debug for WmsImageryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WmsImageryProvider")
            .field("source", &self.source)
            .field("max_in_flight", &self.max_in_flight)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

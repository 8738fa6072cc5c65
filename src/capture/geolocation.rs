//! One-shot device position capture
//!
//! Wraps a single device position query with the configured high-accuracy
//! hint and time bound. Failure never reaches the caller as an error: the
//! outcome lands in the session state (`coords` / `loading` / `error`) so
//! the owning view can always render something coherent, and the operation
//! is retried only by calling `request_location` again.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::GeolocationConfig;
use crate::error::Result;
use crate::events::{CivicEvent, EventBus};
use crate::report::Coordinates;

/// Device geolocation capability.
///
/// `current_position` resolves exactly once per call, with either a position
/// or an error. `available` is the synchronous capability probe consulted
/// before any query is issued.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Whether the device offers geolocation at all
    fn available(&self) -> bool;

    /// Issue a single position query
    async fn current_position(&self, options: &GeolocationConfig) -> Result<Coordinates>;
}

/// Session state and coordinator for location capture.
///
/// While `loading` is true a query is in flight and any `coords`/`error`
/// values are stale leftovers from a prior attempt. A successful query
/// replaces both; a failed query replaces only the error, keeping the last
/// known position available for consecutive submissions from the same spot.
pub struct GeolocationCapture {
    provider: Arc<dyn GeolocationProvider>,
    options: GeolocationConfig,
    events: Arc<EventBus>,
    coords: Option<Coordinates>,
    loading: bool,
    error: Option<String>,
}

impl GeolocationCapture {
    pub fn new(
        provider: Arc<dyn GeolocationProvider>,
        options: GeolocationConfig,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            options,
            events,
            coords: None,
            loading: false,
            error: None,
        }
    }

    /// Last captured position, if any attempt has succeeded
    pub fn coords(&self) -> Option<Coordinates> {
        self.coords
    }

    /// Whether a position query is currently in flight
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Failure message from the most recent unsuccessful attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Issue one device position query.
    ///
    /// On an unsupported device this fails immediately and synchronously,
    /// without touching the provider. Otherwise the query is bounded by the
    /// configured timeout (a provider that never resolves still settles the
    /// session state at that bound).
    pub async fn request_location(&mut self) {
        if !self.provider.available() {
            warn!("geolocation unsupported on this device");
            self.loading = false;
            self.fail("Geolocation is not supported".to_string());
            return;
        }

        debug!(
            high_accuracy = self.options.high_accuracy,
            timeout_ms = self.options.timeout_ms,
            "requesting device position"
        );
        self.loading = true;

        let outcome = timeout(
            self.options.timeout(),
            self.provider.current_position(&self.options),
        )
        .await;
        self.loading = false;

        match outcome {
            Ok(Ok(coords)) => {
                info!(lat = coords.lat, lng = coords.lng, "position captured");
                self.coords = Some(coords);
                self.error = None;
                self.events.emit_lossy(CivicEvent::LocationCaptured {
                    coords,
                    timestamp: Utc::now(),
                });
            }
            Ok(Err(e)) => {
                warn!(error = %e, "position query failed");
                self.fail(e.to_string());
            }
            Err(_) => {
                warn!(timeout_ms = self.options.timeout_ms, "position query timed out");
                self.fail(format!(
                    "No position within {} ms",
                    self.options.timeout_ms
                ));
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.events.emit_lossy(CivicEvent::LocationFailed {
            error: message.clone(),
            timestamp: Utc::now(),
        });
        self.error = Some(message);
    }
}

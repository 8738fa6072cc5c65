//! Event types and distribution bus
//!
//! Provides the `CivicEvent` enum and the `EventBus` the views subscribe to.
//! Submissions and capture outcomes are broadcast so the citizen summary and
//! the admin map update in near real-time without polling the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::report::{Category, Coordinates};

/// Engine events observable by the rendering views
///
/// Events can be serialized for transport if a delivery layer is attached;
/// the core only defines them and broadcasts in-process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CivicEvent {
    /// A report was accepted into the store
    ReportSubmitted {
        /// Report identifier
        report_id: Uuid,
        /// Report category
        category: Category,
        /// Report urgency
        urgency: u8,
        /// When the report was accepted
        timestamp: DateTime<Utc>,
    },

    /// A geolocation request resolved with a position
    LocationCaptured {
        /// Captured coordinate pair
        coords: Coordinates,
        /// When the position arrived
        timestamp: DateTime<Utc>,
    },

    /// A geolocation request failed or timed out
    LocationFailed {
        /// Human-readable failure message, as shown in the capture state
        error: String,
        /// When the failure was observed
        timestamp: DateTime<Utc>,
    },

    /// A voice-note recording started
    RecordingStarted {
        /// When the input stream was acquired
        timestamp: DateTime<Utc>,
    },

    /// A voice-note recording was finalized into a playable clip
    RecordingFinished {
        /// Identifier of the finalized media resource
        media_id: Uuid,
        /// Clip size in bytes
        byte_len: usize,
        /// When the clip was finalized
        timestamp: DateTime<Utc>,
    },

    /// A photo was attached to the in-progress submission
    PhotoAttached {
        /// Identifier of the attached media resource
        media_id: Uuid,
        /// When the photo was attached
        timestamp: DateTime<Utc>,
    },

    /// A resident sent free-form feedback (not a report)
    FeedbackReceived {
        /// Feedback text
        text: String,
        /// When the feedback arrived
        timestamp: DateTime<Utc>,
    },
}

impl CivicEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            CivicEvent::ReportSubmitted { .. } => "ReportSubmitted",
            CivicEvent::LocationCaptured { .. } => "LocationCaptured",
            CivicEvent::LocationFailed { .. } => "LocationFailed",
            CivicEvent::RecordingStarted { .. } => "RecordingStarted",
            CivicEvent::RecordingFinished { .. } => "RecordingFinished",
            CivicEvent::PhotoAttached { .. } => "PhotoAttached",
            CivicEvent::FeedbackReceived { .. } => "FeedbackReceived",
        }
    }
}

/// Central event distribution bus
///
/// Backed by `tokio::broadcast`: non-blocking publish, multiple concurrent
/// subscribers, automatic cleanup when subscribers drop. Constructed once at
/// process start and handed to every component that emits or observes.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CivicEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a new bus buffering up to `capacity` undelivered events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events.
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CivicEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether anyone is listening.
    ///
    /// The views are optional observers; an intake submission must not fail
    /// because no view is currently subscribed.
    pub fn emit_lossy(&self, event: CivicEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

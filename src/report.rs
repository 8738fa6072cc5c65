//! Report data model
//!
//! A `Report` is a single citizen-submitted civic issue record. Reports are
//! immutable once constructed; everything derived from them (severity tier,
//! department routing, marker geometry) is computed at the consumer, never
//! stored here.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Fixed closed set of report categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sanitation,
    PublicWorks,
    Safety,
    Traffic,
    Other,
}

impl Category {
    /// All categories, in the order the selection UI presents them
    pub const ALL: [Category; 5] = [
        Category::Sanitation,
        Category::PublicWorks,
        Category::Safety,
        Category::Traffic,
        Category::Other,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sanitation => "Sanitation",
            Category::PublicWorks => "Public Works",
            Category::Safety => "Safety",
            Category::Traffic => "Traffic",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair, rejecting values outside the valid ranges
    /// (lat in [-90, 90], lng in [-180, 180]).
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidInput(format!(
                "latitude {} out of range [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidInput(format!(
                "longitude {} out of range [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// Opaque reference to a captured media resource (photo or voice note).
///
/// Cheaply cloneable: the byte payload is shared, so copying a `MediaRef`
/// into a `Report` copies a handle, not the data. The payload is excluded
/// from serialization; consumers that need the bytes hold the handle.
#[derive(Debug, Clone, Serialize)]
pub struct MediaRef {
    /// Resource identifier, unique per captured resource
    pub id: Uuid,
    /// MIME type of the payload (e.g. `image/jpeg`, `audio/webm`)
    pub media_type: String,
    /// Shared payload bytes
    #[serde(skip)]
    data: Arc<[u8]>,
}

impl MediaRef {
    /// Wrap captured bytes as a new media resource
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_type: media_type.into(),
            data: Arc::from(data.into_boxed_slice()),
        }
    }

    /// Payload bytes
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PartialEq for MediaRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A single citizen-submitted civic issue record.
///
/// Immutable once created. At least one of {non-empty description, photo,
/// audio, coords} is populated; the intake controller enforces this before
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Unique identifier, generated at creation time
    pub id: Uuid,
    /// Submission instant
    pub created_at: DateTime<Utc>,
    /// Captured photo, if attached
    pub photo: Option<MediaRef>,
    /// Captured voice note, if recorded
    pub audio: Option<MediaRef>,
    /// Capture location, if acquired
    pub coords: Option<Coordinates>,
    /// Issue category
    pub category: Category,
    /// Urgency in [1, 5]
    pub urgency: u8,
    /// Free-text description, stored trimmed, may be empty
    pub description: String,
}

impl Report {
    /// Whether the report carries any content at all.
    ///
    /// This is the submission invariant: a report with no description, no
    /// media, and no location is not worth routing anywhere.
    pub fn has_content(&self) -> bool {
        !self.description.is_empty()
            || self.photo.is_some()
            || self.audio.is_some()
            || self.coords.is_some()
    }
}

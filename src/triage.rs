//! Triage filtering and map-marker derivation
//!
//! **Responsibilities:**
//! - Pure query over the report store by category and minimum urgency
//! - Marker tuples for the external map rendering surface
//!
//! Filtering is recomputed on every call rather than incrementally
//! maintained; store sizes in this domain stay small enough that a full
//! rescan is the right trade-off.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::{department_for, severity_tier};
use crate::report::{Category, Coordinates, MediaRef, Report};
use crate::time::format_relative;

/// Category criterion for the triage views: match all, or exact equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a report in `category` passes this criterion
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

/// Select the reports both triage views render.
///
/// A report passes iff its category matches the criterion and its urgency is
/// at least `min_urgency` (inclusive lower bound). Relative order of the
/// input is preserved, so a newest-first input stays newest-first.
pub fn filter_reports(
    reports: &[Report],
    category: CategoryFilter,
    min_urgency: u8,
) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| category.matches(r.category) && r.urgency >= min_urgency)
        .cloned()
        .collect()
}

/// Map viewport handed to the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

/// One circle marker on the live map
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    /// Marker center
    pub position: Coordinates,
    /// Circle radius in pixels, scaled by urgency
    pub radius: u8,
    /// Stroke/fill color hex, derived from the severity tier
    pub color: &'static str,
    /// Popup content shown when the marker is opened
    pub popup: MarkerPopup,
}

/// Derived popup content for a map marker
#[derive(Debug, Clone, Serialize)]
pub struct MarkerPopup {
    pub category: &'static str,
    pub urgency: u8,
    /// Relative age at derivation time, e.g. "4 minutes ago"
    pub submitted: String,
    pub photo: Option<MediaRef>,
    pub description: String,
    /// Department the report routes to
    pub department: &'static str,
}

/// Derive map markers from an already-filtered report sequence.
///
/// Reports without coordinates produce no marker; they still appear in the
/// list view, just not on the map. Radius grows with urgency (base 8 px)
/// and color comes from the severity tier, so the map reads hottest-first.
pub fn markers(reports: &[Report], now: DateTime<Utc>) -> Vec<Marker> {
    reports
        .iter()
        .filter_map(|r| {
            let position = r.coords?;
            Some(Marker {
                position,
                radius: 8 + r.urgency,
                color: severity_tier(r.urgency).color(),
                popup: MarkerPopup {
                    category: r.category.label(),
                    urgency: r.urgency,
                    submitted: format_relative(r.created_at, now),
                    photo: r.photo.clone(),
                    description: r.description.clone(),
                    department: department_for(r.category),
                },
            })
        })
        .collect()
}

//! Classification rules
//!
//! Pure, total functions mapping urgency to a display-severity tier and
//! category to the responsible municipal department. Both are derived at the
//! consumer on every call; nothing here is stored on the `Report`.

use serde::{Deserialize, Serialize};

use crate::report::Category;

/// Derived display classification of an urgency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityTier {
    High,
    Medium,
    Low,
}

impl SeverityTier {
    /// Fixed display color for this tier (rendering hint, not state)
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::High => "#ef4444",
            SeverityTier::Medium => "#f59e0b",
            SeverityTier::Low => "#22c55e",
        }
    }
}

/// Map an urgency value to its severity tier.
///
/// Urgency 4 and 5 are High, 3 is Medium, 1 and 2 are Low. The function is
/// total over `u8`: values above 5 classify High and 0 classifies Low, so a
/// caller holding an unclamped value still gets a coherent answer.
pub fn severity_tier(urgency: u8) -> SeverityTier {
    if urgency >= 4 {
        SeverityTier::High
    } else if urgency == 3 {
        SeverityTier::Medium
    } else {
        SeverityTier::Low
    }
}

/// Map a category to the municipal department that handles it.
///
/// Total over the category set; `Other` is the fail-safe route to General
/// Services rather than an error.
pub fn department_for(category: Category) -> &'static str {
    match category {
        Category::Sanitation => "Sanitation",
        Category::PublicWorks => "Public Works",
        Category::Traffic => "Traffic Mgmt",
        Category::Safety => "Public Safety",
        Category::Other => "General Services",
    }
}

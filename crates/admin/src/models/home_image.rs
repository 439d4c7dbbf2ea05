//! Homepage image domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meridian_core::HomeImageId;

/// A homepage image set (one carousel row).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeImage {
    /// Unique row ID.
    pub id: HomeImageId,
    /// Image URLs.
    pub images: Vec<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a homepage image set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeImageInput {
    pub images: Vec<String>,
}

/// Input for replacing a homepage image set.
///
/// Submitting an empty list deletes the row; the storefront edit dialog
/// uses that to remove a carousel entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeImageInput {
    pub images: Vec<String>,
}

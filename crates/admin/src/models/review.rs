//! Product review domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meridian_core::{CatalogStatus, ProductId, ReviewId};

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Product being reviewed.
    pub product_id: ProductId,
    /// Reviewer display name.
    pub reviewer: String,
    /// Review subject line.
    pub subject: String,
    /// Review body.
    pub message: String,
    /// Star rating, 1 to 5.
    pub star_rating: i32,
    /// Catalog status; moderation hides reviews by flipping this.
    pub status: CatalogStatus,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new review. Reviews are created active.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub product_id: ProductId,
    pub reviewer: String,
    pub subject: String,
    pub message: String,
    pub star_rating: i32,
}

/// Input for patching a review. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewInput {
    pub product_id: Option<ProductId>,
    pub reviewer: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub star_rating: Option<i32>,
}

/// Sort options for review listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    AToZ,
    ZToA,
    RatingHighToLow,
    RatingLowToHigh,
    DateHighToLow,
    DateLowToHigh,
}

impl ReviewSort {
    /// Parse the query-string form; unknown values fall back to A-to-Z.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ZTOA" => Self::ZToA,
            "REVIEWS_RATING_HIGH_TO_LOW" => Self::RatingHighToLow,
            "REVIEWS_RATING_LOW_TO_HIGH" => Self::RatingLowToHigh,
            "REVIEWS_DATE_HIGH_TO_LOW" => Self::DateHighToLow,
            "REVIEWS_DATE_LOW_TO_HIGH" => Self::DateLowToHigh,
            _ => Self::AToZ,
        }
    }

    /// The ORDER BY clause for this sort.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::AToZ => "reviewer ASC",
            Self::ZToA => "reviewer DESC",
            Self::RatingHighToLow => "star_rating DESC",
            Self::RatingLowToHigh => "star_rating ASC",
            Self::DateHighToLow => "created_at DESC",
            Self::DateLowToHigh => "created_at ASC",
        }
    }
}

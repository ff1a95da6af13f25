//! Rust models matching the database schema.

use angle_catalog_common::{AngleId, BorderRadius};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Status value that makes an angle visible in the unpaginated listing.
pub const STATUS_AVAILABLE: &str = "available";

/// Catalog angle record.
///
/// Every descriptive field is optional: records are stored as submitted and
/// only `border_radius` is normalized on the way in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Angle {
    pub id: AngleId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub border_radius: BorderRadius,
    pub price: Option<f64>,
    pub discount_option: Option<String>,
    pub discounted_percentage: Option<f64>,
    pub discounted_price: Option<f64>,
    pub vat_amount: Option<f64>,
    pub status: Option<String>,
    /// File name of the uploaded image, relative to the angle uploads directory.
    #[serde(rename = "avatarAngle")]
    pub avatar_angle: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Current time at the precision timestamps are stored with.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Angle {
    /// Create an empty record with a fresh ID and both timestamps set to now.
    pub fn new() -> Self {
        let now = timestamp_now();
        Self {
            id: AngleId::new(),
            name: None,
            description: None,
            border_radius: BorderRadius::default(),
            price: None,
            discount_option: None,
            discounted_percentage: None,
            discounted_price: None,
            vat_amount: None,
            status: None,
            avatar_angle: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::new()
    }
}

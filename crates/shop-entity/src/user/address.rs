//! Shipping address value object stored alongside a user.

use serde::{Deserialize, Serialize};

/// Where deliveries for a user are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    /// State or province.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    /// GPS latitude.
    #[serde(default)]
    pub latitude: f64,
    /// GPS longitude.
    #[serde(default)]
    pub longitude: f64,
}

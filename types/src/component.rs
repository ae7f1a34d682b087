//! Catalog record types.

use serde::{Deserialize, Serialize};

/// A PC part as stored in the catalog backend.
///
/// Field names follow the backend's Spanish column names on the wire;
/// the struct exposes English names. The protocol client itself relays
/// tool outputs unopened; this type is for consumers that want to read
/// the payloads it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Numeric catalog identifier
    pub id: i64,
    /// Part category (e.g. "GPU", "CPU", "RAM")
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    /// Model name, the field free-text search matches against
    #[serde(rename = "modelo")]
    pub model: Option<String>,
    /// Price in the store's currency
    #[serde(rename = "precio")]
    pub price: Option<f64>,
    /// Store carrying the part
    #[serde(rename = "tienda")]
    pub store: Option<String>,
    /// Product page URL
    pub url: Option<String>,
    /// Power draw in watts (GPUs, CPUs)
    #[serde(rename = "consumo")]
    pub power_draw: Option<f64>,
    /// CPU socket (motherboards, CPUs)
    pub socket: Option<String>,
    /// RAM specification (e.g. "DDR5-6000")
    #[serde(rename = "rams")]
    pub ram_spec: Option<String>,
    /// Rated wattage (power supplies)
    #[serde(rename = "potencia")]
    pub wattage: Option<f64>,
    /// Product image URL
    #[serde(rename = "img")]
    pub image: Option<String>,
}

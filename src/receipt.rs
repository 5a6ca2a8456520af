// 🧾 Receipt - Submitted purchase document
// Field values stay as the caller sent them; parsing happens per rule

use serde::Deserialize;

/// Receipt as submitted to `POST /receipts/process`
///
/// Missing fields decode to empty values, so a receipt without a `total`
/// is rejected by scoring rather than by decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,

    /// `YYYY-MM-DD`
    pub purchase_date: String,

    /// `HH:MM`, 24-hour clock
    pub purchase_time: String,

    pub items: Vec<Item>,

    /// Decimal string, e.g. "35.35"
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Free text; may carry leading/trailing whitespace
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: &str, price: &str) -> Self {
        Item {
            short_description: short_description.to_string(),
            price: price.to_string(),
        }
    }
}

impl Receipt {
    /// Decode a receipt from a JSON document
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

use serde::{Deserialize, Serialize};

/// A fully-formed asset record, as appended to the caller's asset store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub value: f64,
    /// Always present, possibly empty.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_id: Option<String>,
}

/// A partially-populated asset built from one CSV row.
///
/// Rows that fail required-field validation only carry a `name` (possibly a
/// `"Row <n> (Error)"` placeholder); valid rows carry every required field
/// plus whichever optional fields coerced cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub value: Option<f64>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<String>,
    pub image_url: Option<String>,
    pub contract_address: Option<String>,
    pub token_id: Option<String>,
    pub token_standard: Option<String>,
    pub blockchain_network: Option<String>,
    pub address: Option<String>,
    pub crypto_id: Option<String>,
}

impl AssetDraft {
    /// Finalizes the draft under the given id.
    ///
    /// Returns `None` when any required field (`name`, `categoryId`, `value`)
    /// is absent. A missing description becomes an empty string.
    pub fn into_asset(self, id: String) -> Option<Asset> {
        Some(Asset {
            id,
            name: self.name?,
            category_id: self.category_id?,
            value: self.value?,
            description: self.description.unwrap_or_default(),
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            purchase_date: self.purchase_date,
            image_url: self.image_url,
            contract_address: self.contract_address,
            token_id: self.token_id,
            token_standard: self.token_standard,
            blockchain_network: self.blockchain_network,
            address: self.address,
            crypto_id: self.crypto_id,
        })
    }
}

/// A candidate record shown before commit, tagged with the row it came from.
///
/// `row` uses display numbering: the header is line 1, so the first data row
/// is row 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRecord {
    pub row: usize,
    pub draft: AssetDraft,
}

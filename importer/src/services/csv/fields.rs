//! Typed setters that write a raw cell onto an `AssetDraft`.
//!
//! Each `AssetField` resolves to exactly one `FieldSetter`, so mapping a
//! column onto a field never goes through string-keyed property access. Text
//! setters always succeed; numeric setters reject anything that is not a
//! plain finite decimal.

use common::model::asset::AssetDraft;
use common::model::schema::AssetField;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("\"{0}\" is not a valid number")]
    NotANumber(String),
}

pub type FieldSetter = fn(&mut AssetDraft, &str) -> Result<(), CoercionError>;

/// Parses a plain decimal (`12`, `-3.5`, `.25`, `1e3`) into a finite `f64`.
///
/// Empty strings, `NaN`, `inf`, thousands separators and currency symbols are
/// rejected.
pub fn parse_number(raw: &str) -> Result<f64, CoercionError> {
    let not_a_number = || CoercionError::NotANumber(raw.to_string());
    if !PLAIN_DECIMAL.is_match(raw) {
        return Err(not_a_number());
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(not_a_number)
}

macro_rules! text_setter {
    ($field:ident) => {
        |draft: &mut AssetDraft, raw: &str| -> Result<(), CoercionError> {
            draft.$field = Some(raw.to_string());
            Ok(())
        }
    };
}

macro_rules! number_setter {
    ($field:ident) => {
        |draft: &mut AssetDraft, raw: &str| -> Result<(), CoercionError> {
            draft.$field = Some(parse_number(raw)?);
            Ok(())
        }
    };
}

/// The setter that writes `field`.
pub fn setter_for(field: AssetField) -> FieldSetter {
    match field {
        AssetField::Name => text_setter!(name),
        AssetField::CategoryId => text_setter!(category_id),
        AssetField::Value => number_setter!(value),
        AssetField::Quantity => number_setter!(quantity),
        AssetField::Description => text_setter!(description),
        AssetField::PurchasePrice => number_setter!(purchase_price),
        AssetField::PurchaseDate => text_setter!(purchase_date),
        AssetField::ImageUrl => text_setter!(image_url),
        AssetField::ContractAddress => text_setter!(contract_address),
        AssetField::TokenId => text_setter!(token_id),
        AssetField::TokenStandard => text_setter!(token_standard),
        AssetField::BlockchainNetwork => text_setter!(blockchain_network),
        AssetField::Address => text_setter!(address),
        AssetField::CryptoId => text_setter!(crypto_id),
    }
}

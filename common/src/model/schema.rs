use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value a target field accepts.
///
/// Cells mapped onto a `Number` field are coerced with plain decimal parsing;
/// `Text` fields take the cell verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
}

/// Every asset property an imported column may populate.
///
/// The serialized form is the camelCase property name, which is also what
/// `Display` prints and what gate error messages list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetField {
    Name,
    CategoryId,
    Value,
    Quantity,
    Description,
    PurchasePrice,
    PurchaseDate,
    ImageUrl,
    ContractAddress,
    TokenId,
    TokenStandard,
    BlockchainNetwork,
    Address,
    CryptoId,
}

impl AssetField {
    /// Property name as exposed to callers (`categoryId`, `purchasePrice`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetField::Name => "name",
            AssetField::CategoryId => "categoryId",
            AssetField::Value => "value",
            AssetField::Quantity => "quantity",
            AssetField::Description => "description",
            AssetField::PurchasePrice => "purchasePrice",
            AssetField::PurchaseDate => "purchaseDate",
            AssetField::ImageUrl => "imageUrl",
            AssetField::ContractAddress => "contractAddress",
            AssetField::TokenId => "tokenId",
            AssetField::TokenStandard => "tokenStandard",
            AssetField::BlockchainNetwork => "blockchainNetwork",
            AssetField::Address => "address",
            AssetField::CryptoId => "cryptoId",
        }
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one target field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub field: AssetField,
    pub kind: FieldKind,
    pub required: bool,
    /// Lower-case keywords used to auto-map headers onto this field.
    /// Whitespace, `-` and `_` are ignored when they are compared.
    pub suggestions: &'static [&'static str],
}

impl FieldDescriptor {
    const fn new(
        field: AssetField,
        kind: FieldKind,
        required: bool,
        suggestions: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            kind,
            required,
            suggestions,
        }
    }

    /// Label used in mapping pickers; required fields carry a trailing `*`.
    pub fn option_label(&self) -> String {
        if self.required {
            format!("{} *", self.field)
        } else {
            self.field.to_string()
        }
    }
}

const ASSET_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        AssetField::Name,
        FieldKind::Text,
        true,
        &["name", "title", "item", "asset", "label"],
    ),
    FieldDescriptor::new(
        AssetField::CategoryId,
        FieldKind::Text,
        true,
        &["category", "categoryid", "cat", "group", "type"],
    ),
    FieldDescriptor::new(
        AssetField::Value,
        FieldKind::Number,
        true,
        &["value", "price", "cost", "market value", "worth", "valuation"],
    ),
    FieldDescriptor::new(
        AssetField::Quantity,
        FieldKind::Number,
        false,
        &["quantity", "qty", "count", "amount", "number"],
    ),
    FieldDescriptor::new(
        AssetField::Description,
        FieldKind::Text,
        false,
        &["description", "desc", "notes", "details", "comment"],
    ),
    FieldDescriptor::new(
        AssetField::PurchasePrice,
        FieldKind::Number,
        false,
        &["purchaseprice", "purchase price", "buy price", "cost basis"],
    ),
    FieldDescriptor::new(
        AssetField::PurchaseDate,
        FieldKind::Text,
        false,
        &["purchasedate", "purchase date", "buy date", "bought on"],
    ),
    FieldDescriptor::new(
        AssetField::ImageUrl,
        FieldKind::Text,
        false,
        &["imageurl", "image", "url", "picture", "photo"],
    ),
    FieldDescriptor::new(
        AssetField::ContractAddress,
        FieldKind::Text,
        false,
        &["contractaddress", "contract"],
    ),
    FieldDescriptor::new(
        AssetField::TokenId,
        FieldKind::Text,
        false,
        &["tokenid", "token no"],
    ),
    FieldDescriptor::new(
        AssetField::TokenStandard,
        FieldKind::Text,
        false,
        &["tokenstandard", "standard"],
    ),
    FieldDescriptor::new(
        AssetField::BlockchainNetwork,
        FieldKind::Text,
        false,
        &["blockchainnetwork", "network", "chain"],
    ),
    FieldDescriptor::new(
        AssetField::Address,
        FieldKind::Text,
        false,
        &["address", "location", "property address"],
    ),
    FieldDescriptor::new(
        AssetField::CryptoId,
        FieldKind::Text,
        false,
        &["cryptoid", "crypto symbol", "ticker"],
    ),
];

/// Order in which required fields are listed to callers, e.g. by the
/// mapping gate. Independent of declaration order.
const REQUIRED_ORDER: &[AssetField] = &[
    AssetField::Name,
    AssetField::Value,
    AssetField::CategoryId,
];

/// The fixed, ordered set of fields an import may populate.
///
/// Declaration order matters: header auto-mapping picks the first field whose
/// keywords match. Required fields are reported in `REQUIRED_ORDER`.
#[derive(Debug, Clone, Copy)]
pub struct TargetSchema {
    fields: &'static [FieldDescriptor],
}

impl TargetSchema {
    /// The asset schema used by the import flow.
    pub const fn assets() -> Self {
        Self {
            fields: ASSET_FIELDS,
        }
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn descriptor(&self, field: AssetField) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|d| d.field == field)
    }

    /// Required fields as `name, value, categoryId`.
    pub fn required(&self) -> impl Iterator<Item = AssetField> + '_ {
        REQUIRED_ORDER
            .iter()
            .copied()
            .filter(|field| self.is_required(*field))
    }

    pub fn optional(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.fields.iter().filter(|d| !d.required)
    }

    pub fn is_required(&self, field: AssetField) -> bool {
        self.descriptor(field).is_some_and(|d| d.required)
    }
}

impl Default for TargetSchema {
    fn default() -> Self {
        Self::assets()
    }
}

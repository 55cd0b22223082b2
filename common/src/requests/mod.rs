use crate::model::schema::AssetField;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
/// A caller's edit to the column mapping.
/// `field: None` tells the importer to ignore the column.
pub struct MappingUpdate {
    pub header: String,
    pub field: Option<AssetField>,
}

pub mod asset;
pub mod category;
pub mod csv;
pub mod schema;

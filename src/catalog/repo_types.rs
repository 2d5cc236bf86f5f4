use serde::Serialize;
use sqlx::FromRow;

use crate::loader::extract::ParsedRow;

/// Separator used when a row's syntax examples are stored as one column.
pub const EXAMPLES_SEPARATOR: &str = "; ";

/// Catalog row as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CatalogEntry {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_name: String,
    pub mutability: String,
    pub description: Option<String>,
    pub syntax_examples: Option<String>,
}

/// Catalog row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogEntry {
    pub type_name: String,
    pub mutability: String,
    pub description: Option<String>,
    pub syntax_examples: Option<String>,
}

impl From<ParsedRow> for NewCatalogEntry {
    fn from(row: ParsedRow) -> Self {
        Self {
            type_name: row.type_name,
            mutability: row.mutability,
            description: Some(row.description),
            syntax_examples: Some(row.syntax_examples.join(EXAMPLES_SEPARATOR)),
        }
    }
}

use serde::Serialize;

use crate::catalog::repo_types::CatalogEntry;

/// Body of `GET /data`.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Vec<CatalogEntry>,
    pub total: usize,
}

impl From<Vec<CatalogEntry>> for DataResponse {
    fn from(data: Vec<CatalogEntry>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

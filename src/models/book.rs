//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// System-assigned identifier, stable for the record's lifetime
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i64,
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: i64,
}

/// Partial update request. A field left out of the payload keeps its
/// stored value; only present fields overwrite.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

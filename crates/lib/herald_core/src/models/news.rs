//! News post models.

use serde::{Deserialize, Serialize};

/// Row from the `news` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

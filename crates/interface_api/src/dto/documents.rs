//! Document DTOs

use serde::{Deserialize, Serialize};

/// Result of an upload
///
/// `reference` is absent when the uploaded file was empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub reference: Option<String>,
}

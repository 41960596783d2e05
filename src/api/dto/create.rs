//! DTOs for the link creation endpoint.

use serde::Serialize;

/// Successful creation response, HTTP 201.
///
/// ```json
/// {"status": "created", "link": "aBcDe"}
/// ```
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub link: String,
}

impl CreatedResponse {
    pub fn new(link: String) -> Self {
        Self {
            status: "created",
            link,
        }
    }
}

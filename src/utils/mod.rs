//! Project-specific utilities live here.

use acervo_http::AppError;
use serde_json::json;

/// Reject the request when any `(field, value)` pair is blank.
///
/// All blank fields are reported together in the error details.
pub fn require_non_blank(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let details: Vec<serde_json::Value> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| json!({ "field": field, "error": "required" }))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, "Campos obrigatórios não informados"))
    }
}

use crate::utils::error::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(?:json|JSON)?").expect("static fence regex"))
}

/// Removes markdown code fences a model may wrap around its JSON.
pub fn strip_code_fences(text: &str) -> String {
    fence_pattern().replace_all(text.trim(), "").trim().to_string()
}

pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_code_fences(text);
    Ok(serde_json::from_str(&cleaned)?)
}

/// Same as [`parse_json_reply`] but an empty reply reads as `[]`.
pub fn parse_json_list_reply<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&cleaned)?)
}

//! Parses the model's reply into keyword suggestions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// At most this many keywords are returned.
pub const MAX_KEYWORDS: usize = 20;

const MALFORMED_KEYWORD: &str = "Malformed keyword";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
}

impl Keyword {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

/// Parses a JSON array of keywords.
///
/// Items may be bare strings or `{"keyword": "..."}` objects; anything else
/// is kept in place as a "Malformed keyword" marker so the list length
/// still reflects what the model produced. A Markdown code fence around the
/// array is tolerated.
pub fn parse_keywords(reply: &str) -> Result<Vec<Keyword>> {
    let body = strip_code_fence(reply.trim());

    let parsed: Value =
        serde_json::from_str(body).map_err(|e| AppError::MalformedKeywords(e.to_string()))?;
    let items = parsed
        .as_array()
        .ok_or_else(|| AppError::MalformedKeywords("not an array".to_string()))?;

    Ok(items.iter().take(MAX_KEYWORDS).map(to_keyword).collect())
}

fn to_keyword(item: &Value) -> Keyword {
    match item {
        Value::String(s) => Keyword::new(s.as_str()),
        Value::Object(map) => match map.get("keyword") {
            Some(Value::String(s)) => Keyword::new(s.as_str()),
            _ => Keyword::new(MALFORMED_KEYWORD),
        },
        _ => Keyword::new(MALFORMED_KEYWORD),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an info string such as `json` on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

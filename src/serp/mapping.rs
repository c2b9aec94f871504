//! Maps the DataForSEO live SERP response to the application's result shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Maximum number of organic results returned to the client
pub const MAX_RESULTS: usize = 10;

/// One organic search result, positioned from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    pub position: usize,
}

/// Extracts up to ten organic results from a provider response.
///
/// Non-organic items (ads, knowledge graph, related searches) are skipped
/// before positions are assigned, so positions are always `1..=n`.
pub fn map_organic_results(data: &Value) -> Result<Vec<SearchResult>> {
    let task_result = data
        .get("tasks")
        .and_then(|tasks| tasks.get(0))
        .and_then(|task| task.get("result"))
        .filter(|result| !result.is_null())
        .ok_or_else(|| {
            AppError::InvalidUpstreamResponse("Invalid response from DataForSEO API".to_string())
        })?;

    let items = task_result
        .get(0)
        .and_then(|first| first.get("items"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let results = items
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("organic"))
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(index, item)| SearchResult {
            title: text_or(item, "title", "No title available"),
            url: text_or(item, "url", "#"),
            description: text_or(item, "description", "No description available"),
            position: index + 1,
        })
        .collect();

    Ok(results)
}

/// Non-empty string field, or the fallback.
fn text_or(item: &Value, field: &str, fallback: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mixed_response() -> Value {
        let organic = |n: u32| {
            json!({
                "type": "organic",
                "title": format!("Result {}", n),
                "url": format!("https://example.com/{}", n),
                "description": format!("Description {}", n),
            })
        };
        json!({
            "tasks": [{
                "result": [{
                    "items": [
                        organic(1),
                        {"type": "paid", "title": "Ad 1", "url": "https://ad.example.com/1"},
                        organic(2), organic(3), organic(4),
                        {"type": "related_searches", "items": ["related search 1"]},
                        organic(5), organic(6), organic(7), organic(8), organic(9),
                        {"type": "knowledge_graph", "title": "Knowledge Graph"},
                        organic(10), organic(11), organic(12),
                    ]
                }]
            }]
        })
    }

    #[test]
    fn test_filters_out_non_organic_results() {
        let results = map_organic_results(&mixed_response()).unwrap();
        assert!(!results.iter().any(|r| r.title.contains("Ad ")));
        assert!(!results.iter().any(|r| r.title.contains("Knowledge Graph")));
    }

    #[test]
    fn test_limits_to_ten_results() {
        let results = map_organic_results(&mixed_response()).unwrap();
        assert_eq!(results.len(), 10);
        assert!(!results.iter().any(|r| r.title == "Result 11"));
        assert_eq!(results[9].title, "Result 10");
    }

    #[test]
    fn test_positions_are_sequential() {
        let results = map_organic_results(&mixed_response()).unwrap();
        for (index, result) in results.iter().enumerate() {
            assert_eq!(result.position, index + 1);
        }
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let data = json!({
            "tasks": [{"result": [{"items": [
                {"type": "organic"},
                {"type": "organic", "title": "Complete Item", "url": "https://example.com", "description": "A description"}
            ]}]}]
        });

        let results = map_organic_results(&data).unwrap();
        assert_eq!(results[0].title, "No title available");
        assert_eq!(results[0].url, "#");
        assert_eq!(results[0].description, "No description available");
        assert_eq!(results[1].title, "Complete Item");
    }

    #[test]
    fn test_empty_items_yield_no_results() {
        let data = json!({"tasks": [{"result": [{"items": null}]}]});
        assert!(map_organic_results(&data).unwrap().is_empty());

        let data = json!({"tasks": [{"result": []}]});
        assert!(map_organic_results(&data).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_shape_is_rejected() {
        for data in [json!({}), json!({"tasks": []}), json!({"tasks": [{"result": null}]})] {
            let err = map_organic_results(&data).unwrap_err();
            assert!(matches!(err, AppError::InvalidUpstreamResponse(_)));
            assert_eq!(err.to_string(), "Invalid response from DataForSEO API");
        }
    }
}

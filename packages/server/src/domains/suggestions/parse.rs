//! Provider response parsing and reconciliation against the offered candidates

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::data::Suggestion;
use super::prompt::Candidate;

pub const MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_REASONING: &str = "No reasoning provided";

/// First suggestions-shaped JSON value in a model response.
///
/// A fenced code block is tried first; otherwise the text is scanned from
/// each `{` or `[` until a value parses that is either an object holding a
/// `suggestions` array or a non-empty array of objects. Numbers, strings and
/// other stray brackets in the prose are skipped.
pub fn extract_json_payload(response: &str) -> Option<Value> {
    let trimmed = response.trim();

    if let Some(fenced) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced) {
            if is_suggestions_shaped(&value) {
                return Some(value);
            }
        }
    }

    trimmed
        .char_indices()
        .filter(|(_, c)| *c == '{' || *c == '[')
        .find_map(|(i, _)| {
            serde_json::Deserializer::from_str(&trimmed[i..])
                .into_iter::<Value>()
                .next()
                .and_then(Result::ok)
                .filter(is_suggestions_shaped)
        })
}

fn is_suggestions_shaped(value: &Value) -> bool {
    match value {
        Value::Object(map) => matches!(map.get("suggestions"), Some(Value::Array(_))),
        Value::Array(items) => !items.is_empty() && items.iter().all(Value::is_object),
        _ => false,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // skip a language tag such as "json"
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Turn the provider payload into validated suggestions.
///
/// Accepts `{"suggestions": [...]}` or a bare array. Entries naming an id
/// that was not offered are dropped; scores are clamped to [0, 1]; duplicate
/// ids keep their highest score. Result is sorted by score and truncated.
/// Errors only when the payload has no suggestion list at all.
pub fn reconcile(payload: &Value, candidates: &[Candidate]) -> Result<Vec<Suggestion>, String> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("suggestions") {
            Some(Value::Array(items)) => items,
            _ => return Err("response has no suggestions list".to_string()),
        },
        _ => return Err("response is not a JSON object or array".to_string()),
    };

    let offered: HashMap<Uuid, &Candidate> = candidates.iter().map(|c| (c.id, c)).collect();
    let mut accepted: HashMap<Uuid, Suggestion> = HashMap::new();

    for item in items {
        let Some(buddy_id) = item_buddy_id(item) else {
            debug!(item = %item, "Dropping suggestion without a usable buddy id");
            continue;
        };
        let Some(candidate) = offered.get(&buddy_id) else {
            debug!(buddy_id = %buddy_id, "Dropping suggestion for a buddy that was not offered");
            continue;
        };

        let suggestion = Suggestion {
            buddy_id,
            buddy_name: candidate.name.clone(),
            score: item_score(item).clamp(0.0, 1.0),
            reasoning: item
                .get("reasoning")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_REASONING)
                .to_string(),
            buddy_profile_summary: candidate.summary(),
        };

        match accepted.get(&buddy_id) {
            Some(existing) if existing.score >= suggestion.score => {}
            _ => {
                accepted.insert(buddy_id, suggestion);
            }
        }
    }

    let mut suggestions: Vec<Suggestion> = accepted.into_values().collect();
    suggestions.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.buddy_name.cmp(&b.buddy_name))
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(suggestions)
}

fn item_buddy_id(item: &Value) -> Option<Uuid> {
    ["buddyId", "buddy_id", "id"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

/// Numeric or numeric-string score; anything else counts as 0
fn item_score(item: &Value) -> f64 {
    match item.get("score") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate {
                id: Uuid::new_v4(),
                name: format!("Buddy {}", i),
                location: None,
                unit: None,
                tech_stack: vec![],
                interests: vec![],
                experience: None,
                languages: vec![],
            })
            .collect()
    }

    #[test]
    fn test_extract_from_code_fence() {
        let text = "Here you go:\n```json\n{\"suggestions\": []}\n```\nThanks";
        assert_eq!(extract_json_payload(text), Some(json!({"suggestions": []})));
    }

    #[test]
    fn test_extract_first_well_formed_value() {
        // braces in prose before the payload must not break extraction
        let text = "Scores {roughly} below: {\"suggestions\": [{\"score\": 1}]} trailing {junk";
        assert_eq!(
            extract_json_payload(text),
            Some(json!({"suggestions": [{"score": 1}]}))
        );
    }

    #[test]
    fn test_extract_bare_array_and_failure() {
        assert_eq!(
            extract_json_payload("[{\"buddyId\": \"x\"}]"),
            Some(json!([{"buddyId": "x"}]))
        );
        assert_eq!(extract_json_payload("[1, 2]"), None);
        assert_eq!(extract_json_payload("{\"matches\": []}"), None);
        assert_eq!(extract_json_payload("no json here"), None);
    }

    #[test]
    fn test_extract_skips_bracketed_prose_before_ranking() {
        let c = candidates(1);
        let text = format!(
            "I reviewed [1] candidate and ranked them:\n{{\"suggestions\":[{{\"buddyId\":\"{}\",\"score\":0.9,\"reasoning\":\"Same office\"}}]}}",
            c[0].id
        );

        let payload = extract_json_payload(&text).unwrap();
        let suggestions = reconcile(&payload, &c).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].buddy_id, c[0].id);
        assert_eq!(suggestions[0].score, 0.9);
    }

    #[test]
    fn test_reconcile_drops_unknown_ids_and_clamps() {
        let c = candidates(2);
        let payload = json!({"suggestions": [
            {"buddyId": c[0].id.to_string(), "score": 1.7, "reasoning": "Same team"},
            {"buddyId": Uuid::new_v4().to_string(), "score": 0.99, "reasoning": "Hallucinated"},
            {"buddyId": c[1].id.to_string(), "score": -0.2},
            {"buddyId": "not-a-uuid", "score": 0.5},
        ]});

        let suggestions = reconcile(&payload, &c).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].buddy_id, c[0].id);
        assert_eq!(suggestions[0].score, 1.0);
        assert_eq!(suggestions[0].buddy_name, "Buddy 0");
        assert_eq!(suggestions[1].score, 0.0);
        assert_eq!(suggestions[1].reasoning, DEFAULT_REASONING);
    }

    #[test]
    fn test_reconcile_sorts_and_truncates() {
        let c = candidates(7);
        let items: Vec<Value> = c
            .iter()
            .enumerate()
            .map(|(i, cand)| json!({"buddyId": cand.id.to_string(), "score": i as f64 / 10.0}))
            .collect();

        let suggestions = reconcile(&Value::Array(items), &c).unwrap();
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(suggestions[0].buddy_id, c[6].id);
    }

    #[test]
    fn test_reconcile_duplicate_ids_keep_highest() {
        let c = candidates(1);
        let id = c[0].id.to_string();
        let payload = json!([
            {"buddyId": id, "score": 0.4, "reasoning": "low"},
            {"buddyId": id, "score": "0.8", "reasoning": "high"},
        ]);
        let suggestions = reconcile(&payload, &c).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].reasoning, "high");
        assert_eq!(suggestions[0].score, 0.8);
    }

    #[test]
    fn test_reconcile_rejects_shapeless_payload() {
        assert!(reconcile(&json!({"matches": []}), &candidates(1)).is_err());
        assert!(reconcile(&json!("text"), &candidates(1)).is_err());
        assert_eq!(reconcile(&json!({"suggestions": []}), &candidates(1)).unwrap(), vec![]);
    }
}

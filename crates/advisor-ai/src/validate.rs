//! Recommendation schema validation.

use advisor_core::error::AdvisorError;
use advisor_core::types::{Action, Recommendation};
use serde_json::{Map, Value};

/// Fields every recommendation must carry, in report order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "recommendation",
    "confidence",
    "targetPrice",
    "stopLoss",
    "reasoning",
    "risks",
];

/// Check a parsed object against the recommendation schema.
///
/// `null` counts as missing. All problems are collected before failing so the
/// error lists every missing and invalid field at once.
pub fn validate(object: &Map<String, Value>) -> Result<Recommendation, AdvisorError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| object.get(**field).map_or(true, Value::is_null))
        .map(|field| field.to_string())
        .collect();

    let mut invalid = Vec::new();

    let action = field(object, "recommendation").and_then(|v| {
        let parsed = v
            .as_str()
            .and_then(|s| Action::from_wire(&s.trim().to_ascii_uppercase()));
        if parsed.is_none() {
            invalid.push("recommendation".to_string());
        }
        parsed
    });

    let confidence = field(object, "confidence").and_then(|v| {
        let parsed = v.as_f64().filter(|c| (0.0..=1.0).contains(c));
        if parsed.is_none() {
            invalid.push("confidence".to_string());
        }
        parsed
    });

    let mut price = |name: &str| {
        field(object, name).and_then(|v| {
            let parsed = v.as_f64().filter(|p| p.is_finite() && *p > 0.0);
            if parsed.is_none() {
                invalid.push(name.to_string());
            }
            parsed
        })
    };
    let target_price = price("targetPrice");
    let stop_loss = price("stopLoss");

    let reasoning = field(object, "reasoning").and_then(|v| {
        let parsed = v
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if parsed.is_none() {
            invalid.push("reasoning".to_string());
        }
        parsed
    });

    let risks = field(object, "risks").and_then(|v| {
        let parsed = string_list(v).filter(|list| !list.is_empty());
        if parsed.is_none() {
            invalid.push("risks".to_string());
        }
        parsed
    });

    let catalysts = match field(object, "catalysts") {
        None => Some(Vec::new()),
        Some(v) => {
            let parsed = string_list(v);
            if parsed.is_none() {
                invalid.push("catalysts".to_string());
            }
            parsed
        }
    };

    match (action, confidence, target_price, stop_loss, reasoning, risks, catalysts) {
        (
            Some(recommendation),
            Some(confidence),
            Some(target_price),
            Some(stop_loss),
            Some(reasoning),
            Some(risks),
            Some(catalysts),
        ) if missing.is_empty() && invalid.is_empty() => Ok(Recommendation {
            recommendation,
            confidence,
            target_price,
            stop_loss,
            reasoning,
            risks,
            catalysts,
        }),
        _ => Err(AdvisorError::SchemaValidation {
            missing_fields: missing,
            invalid_fields: invalid,
        }),
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|v| !v.is_null())
}

/// Array of non-empty strings, trimmed.
fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect()
}

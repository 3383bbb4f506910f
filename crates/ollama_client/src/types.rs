use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

/// What the local model is asked to return.
///
/// Only used for the schema in the prompt and for lenient reading on the
/// client side; the gateway itself passes the model JSON through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct AiRecommendation {
    pub recommendations: Vec<AiPick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct AiPick {
    pub lure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub technique: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<Why>,
}

/// Models emit `why` either as one sentence or as a list of reasons.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Why {
    One(String),
    Many(Vec<String>),
}

impl Why {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Why::One(line) => vec![line],
            Why::Many(lines) => lines,
        }
    }
}

/// Scalar as display text. Null, empty strings and containers read as absent.
fn lenient_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_lines(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(items.iter().filter_map(|v| lenient_text(Some(v))).collect()),
        other => lenient_text(Some(other)).map(|line| vec![line]),
    }
}

impl AiPick {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self {
                lure: lenient_text(value.get("lure")).unwrap_or_default(),
                color: lenient_text(value.get("color")),
                weight: lenient_text(value.get("weight")),
                technique: lenient_text(value.get("technique")).unwrap_or_default(),
                why: match value.get("why") {
                    Some(Value::Array(_)) => lenient_lines(value.get("why")).map(Why::Many),
                    other => lenient_text(other).map(Why::One),
                },
            },
            other => Self {
                lure: lenient_text(Some(other)).unwrap_or_default(),
                ..Self::default()
            },
        }
    }
}

impl AiRecommendation {
    /// Read model JSON without rejecting odd field types. A missing or
    /// non-array `recommendations` reads as no picks.
    pub fn from_value(value: &Value) -> Self {
        let recommendations = value
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(AiPick::from_value).collect())
            .unwrap_or_default();
        let notes = match value.get("notes") {
            None | Some(Value::Null) => None,
            notes => Some(lenient_lines(notes).unwrap_or_default()),
        };
        Self {
            recommendations,
            notes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Ollama request failed: {0}")]
    Http(String),
    #[error("Ollama error {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Model returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Shape(String),
}

/// Parse and check the model's message content.
///
/// Empty content is treated as `{}`. The only shape requirement is a
/// `recommendations` array; the JSON is returned as the model wrote it.
pub fn parse_model_content(content: &str) -> Result<Value, AiError> {
    let trimmed = content.trim();
    let text = if trimmed.is_empty() { "{}" } else { trimmed };

    let value: Value = serde_json::from_str(text)?;
    if !value
        .get("recommendations")
        .map(|r| r.is_array())
        .unwrap_or(false)
    {
        return Err(AiError::Shape(
            "Model JSON missing 'recommendations' array".into(),
        ));
    }

    Ok(value)
}

/// Pull `message.content` out of an Ollama `/api/chat` response body.
pub fn extract_message_content(body: &Value) -> &str {
    body.get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_returns_model_json_unchanged() {
        let content = r#"
            {"recommendations":[
                {"lure":"Jig","weight":0.375,"technique":null},
                "Ned rig"
             ],
             "notes":["x"],
             "confidence":"high"}
        "#;
        let parsed = parse_model_content(content).expect("array present");
        assert_eq!(parsed["recommendations"][0]["weight"], 0.375);
        assert_eq!(parsed["recommendations"][1], "Ned rig");
        assert_eq!(parsed["confidence"], "high");
    }

    #[test]
    fn test_from_value_reads_both_why_forms() {
        let value = json!({
            "recommendations": [
                {"lure":"3.5\" tube","color":"green pumpkin","weight":"3/16 oz",
                 "technique":"drag across rock","why":["matches craws","cold water friendly"]},
                {"lure":"Jerkbait","technique":"long pauses","why":"suspending fish"}
            ],
            "notes": ["Clear water → natural colors"]
        });
        let rec = AiRecommendation::from_value(&value);

        assert_eq!(rec.recommendations.len(), 2);
        assert_eq!(rec.recommendations[0].color.as_deref(), Some("green pumpkin"));
        assert_eq!(
            rec.recommendations[0].why.clone().map(Why::into_lines),
            Some(vec!["matches craws".to_string(), "cold water friendly".to_string()])
        );
        assert_eq!(rec.recommendations[1].color, None);
        assert_eq!(
            rec.recommendations[1].why.clone().map(Why::into_lines),
            Some(vec!["suspending fish".to_string()])
        );
        assert_eq!(rec.notes, Some(vec!["Clear water → natural colors".to_string()]));
    }

    #[test]
    fn test_from_value_tolerates_odd_field_types() {
        let value = json!({
            "recommendations": [
                {"lure":"Jig","color":null,"weight":0.375,"technique":null},
                "Ned rig",
                42
            ]
        });
        let rec = AiRecommendation::from_value(&value);

        assert_eq!(rec.recommendations.len(), 3);
        assert_eq!(rec.recommendations[0].lure, "Jig");
        assert_eq!(rec.recommendations[0].color, None);
        assert_eq!(rec.recommendations[0].weight.as_deref(), Some("0.375"));
        assert_eq!(rec.recommendations[0].technique, "");
        assert_eq!(rec.recommendations[1].lure, "Ned rig");
        assert_eq!(rec.recommendations[2].lure, "42");
        assert_eq!(rec.notes, None);
    }

    #[test]
    fn test_from_value_without_array_is_empty() {
        let rec = AiRecommendation::from_value(&json!({"notes": "slow down"}));
        assert!(rec.recommendations.is_empty());
        assert_eq!(rec.notes, Some(vec!["slow down".to_string()]));
    }

    #[test]
    fn test_missing_recommendations_is_shape_error() {
        let err = parse_model_content(r#"{"notrecs":[]}"#).unwrap_err();
        assert!(matches!(err, AiError::Shape(_)));
        assert_eq!(err.to_string(), "Model JSON missing 'recommendations' array");
    }

    #[test]
    fn test_recommendations_not_array_is_shape_error() {
        let err = parse_model_content(r#"{"recommendations":"tube"}"#).unwrap_err();
        assert!(matches!(err, AiError::Shape(_)));
    }

    #[test]
    fn test_empty_content_is_shape_error() {
        let err = parse_model_content("   ").unwrap_err();
        assert!(matches!(err, AiError::Shape(_)));
    }

    #[test]
    fn test_non_json_content() {
        let err = parse_model_content("Sure! Here are some baits: ...").unwrap_err();
        assert!(matches!(err, AiError::Json(_)));
    }

    #[test]
    fn test_extract_message_content() {
        let body = json!({
            "model": "phi3:3.8b",
            "message": {"role": "assistant", "content": " {} "},
            "done": true
        });
        assert_eq!(extract_message_content(&body), " {} ");
        assert_eq!(extract_message_content(&json!({"done": true})), "");
    }
}

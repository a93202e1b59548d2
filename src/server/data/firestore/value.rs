//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore wraps every value in a single-key object naming its type, e.g.
//! `{"stringValue": "abc"}` or `{"arrayValue": {"values": [...]}}`. Integers travel as
//! decimal strings.

use serde_json::{json, Map, Number, Value};

/// Encodes a JSON value as a Firestore `Value`.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            if items.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                json!({ "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() } })
            }
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encodes each entry of a JSON object, producing a Firestore `fields` map.
pub fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode(value)))
        .collect()
}

/// Decodes a Firestore `Value` back into plain JSON.
///
/// Timestamps, references and bytes decode to their string form. Unknown encodings
/// decode to null.
pub fn decode(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = map.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => inner.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|i| Value::Number(i.into()))
            .or_else(|| inner.as_i64().map(|i| Value::Number(i.into())))
            .unwrap_or(Value::Null),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

/// Decodes a Firestore `fields` map into a JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_settings_shaped_document() {
        let document = json!({
            "auto_role_ids": ["1", "2"],
            "welcome_channel_id": "",
            "count": 3
        });

        let encoded = encode_fields(document.as_object().unwrap());

        assert_eq!(
            encoded["auto_role_ids"],
            json!({"arrayValue": {"values": [{"stringValue": "1"}, {"stringValue": "2"}]}})
        );
        assert_eq!(encoded["welcome_channel_id"], json!({"stringValue": ""}));
        assert_eq!(encoded["count"], json!({"integerValue": "3"}));
    }

    #[test]
    fn empty_array_omits_values() {
        assert_eq!(encode(&json!([])), json!({"arrayValue": {}}));
        assert_eq!(decode(&json!({"arrayValue": {}})), json!([]));
    }

    #[test]
    fn decodes_fields_written_by_other_clients() {
        let fields = json!({
            "last_updated": {"timestampValue": "2026-01-10T12:00:00Z"},
            "premium": {"booleanValue": true},
            "ratio": {"doubleValue": 0.5},
            "stats": {"mapValue": {"fields": {"joins": {"integerValue": "12"}}}},
            "note": {"nullValue": null}
        });

        let decoded = decode_fields(fields.as_object().unwrap());

        assert_eq!(decoded["last_updated"], json!("2026-01-10T12:00:00Z"));
        assert_eq!(decoded["premium"], json!(true));
        assert_eq!(decoded["ratio"], json!(0.5));
        assert_eq!(decoded["stats"], json!({"joins": 12}));
        assert_eq!(decoded["note"], Value::Null);
    }
}

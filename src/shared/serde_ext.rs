use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same way as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<String>,
    }

    #[test]
    fn null_and_missing_sequences_read_as_empty() {
        let from_null: Holder = serde_json::from_str(r#"{"items":null}"#).expect("null");
        let from_missing: Holder = serde_json::from_str("{}").expect("missing");
        let from_value: Holder = serde_json::from_str(r#"{"items":["a"]}"#).expect("value");
        assert!(from_null.items.is_empty());
        assert!(from_missing.items.is_empty());
        assert_eq!(from_value.items, vec!["a".to_string()]);
    }
}

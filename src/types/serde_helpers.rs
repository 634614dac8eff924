//! Custom serde helpers for the platform's loose JSON.
//!
//! The vendor freely sends `null` for empty lists and `""` for absent
//! identifiers. These modules normalize both.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use ainfinit_api_client::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "null_as_default::deserialize", default)]
///     rows: Vec<String>,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"rows":null}"#).unwrap();
/// assert!(response.rows.is_empty());
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, mapping `null` to `T::default()`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Default + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Helper for empty strings that should be deserialized as None.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use ainfinit_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     item_code: Option<String>,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"item_code":""}"#).unwrap();
/// assert!(response.item_code.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Lists {
        #[serde(deserialize_with = "null_as_default::deserialize", default)]
        rows: Vec<i32>,
        #[serde(deserialize_with = "null_as_default::deserialize", default)]
        name: String,
    }

    #[test]
    fn test_null_as_default() {
        let lists: Lists = serde_json::from_str(r#"{"rows":null,"name":null}"#).unwrap();
        assert!(lists.rows.is_empty());
        assert!(lists.name.is_empty());

        let lists: Lists = serde_json::from_str(r#"{"rows":[1,2],"name":"x"}"#).unwrap();
        assert_eq!(lists.rows, vec![1, 2]);
        assert_eq!(lists.name, "x");
    }

    #[test]
    fn test_null_as_default_missing_field() {
        let lists: Lists = serde_json::from_str("{}").unwrap();
        assert!(lists.rows.is_empty());
    }

    #[derive(Deserialize, Debug)]
    struct Codes {
        #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
        code: Option<String>,
    }

    #[test]
    fn test_empty_string_as_none() {
        let codes: Codes = serde_json::from_str(r#"{"code":""}"#).unwrap();
        assert!(codes.code.is_none());
        let codes: Codes = serde_json::from_str(r#"{"code":null}"#).unwrap();
        assert!(codes.code.is_none());
        let codes: Codes = serde_json::from_str(r#"{"code":"A1"}"#).unwrap();
        assert_eq!(codes.code.as_deref(), Some("A1"));
    }
}

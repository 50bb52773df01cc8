use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A primitive query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Query parameter bag. Ordered so that outbound query strings are stable.
pub type Params = BTreeMap<String, ParamValue>;

/// One half of a latitude/longitude pair, as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    /// Whether this value counts as absent for validation.
    ///
    /// Text is missing when empty or whitespace-only. A number is missing
    /// only when it is NaN or infinite, so `0` (the equator or the prime
    /// meridian) is a usable coordinate.
    pub fn is_missing(&self) -> bool {
        match self {
            Coordinate::Text(s) => s.trim().is_empty(),
            Coordinate::Number(n) => !n.is_finite(),
        }
    }

    /// Renders the `ll` parameter value, `"<lat>,<lng>"`.
    pub fn pair(lat: &Coordinate, lng: &Coordinate) -> String {
        format!("{},{}", lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Text(s) => f.write_str(s),
            Coordinate::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate::Text(value)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<f32> for Coordinate {
    fn from(value: f32) -> Self {
        Coordinate::Number(value.into())
    }
}

impl From<i32> for Coordinate {
    fn from(value: i32) -> Self {
        Coordinate::Number(value.into())
    }
}

/// Which members of the response body the caller wants back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKeys {
    Single(String),
    Many(Vec<String>),
}

impl ResponseKeys {
    pub fn single(key: impl Into<String>) -> Self {
        ResponseKeys::Single(key.into())
    }

    pub fn many(keys: &[&str]) -> Self {
        ResponseKeys::Many(keys.iter().map(|k| k.to_string()).collect())
    }

    pub fn keys(&self) -> Vec<&str> {
        match self {
            ResponseKeys::Single(key) => vec![key.as_str()],
            ResponseKeys::Many(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ResponseKeys {
    fn from(value: &str) -> Self {
        ResponseKeys::Single(value.to_string())
    }
}

/// A fully shaped call handed to an [`ApiInvoker`](crate::domain::ports::ApiInvoker).
///
/// The path is kept as individual segments so that caller-supplied
/// identifiers stay one segment each, whatever characters they contain.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub segments: Vec<String>,
    pub access_token: Option<String>,
    pub response_keys: ResponseKeys,
    pub params: Option<Params>,
}

impl ApiRequest {
    /// Slash-joined path for display, e.g. `/venues/v1/tips`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_pair_formatting() {
        assert_eq!(
            Coordinate::pair(&Coordinate::from(10), &Coordinate::from(20)),
            "10,20"
        );
        assert_eq!(
            Coordinate::pair(&Coordinate::from(40.7), &Coordinate::from("-74.0")),
            "40.7,-74.0"
        );
    }

    #[test]
    fn test_coordinate_missing() {
        assert!(Coordinate::from("").is_missing());
        assert!(Coordinate::from("  ").is_missing());
        assert!(Coordinate::from(f64::NAN).is_missing());
        assert!(!Coordinate::from(0).is_missing());
        assert!(!Coordinate::from("51.5").is_missing());
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from("checkin").to_string(), "checkin");
        assert_eq!(ParamValue::from(50).to_string(), "50");
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_param_value_deserializes_untagged() {
        let params: Params =
            serde_json::from_str(r#"{"limit": 10, "query": "coffee", "radius": 250.5}"#).unwrap();
        assert_eq!(params["limit"], ParamValue::Integer(10));
        assert_eq!(params["query"], ParamValue::Text("coffee".to_string()));
        assert_eq!(params["radius"], ParamValue::Float(250.5));
    }

    #[test]
    fn test_request_path_display() {
        let request = ApiRequest {
            segments: vec!["venues".to_string(), "v1".to_string(), "tips".to_string()],
            access_token: None,
            response_keys: ResponseKeys::single("tips"),
            params: None,
        };
        assert_eq!(request.path(), "/venues/v1/tips");
    }

    #[test]
    fn test_response_keys() {
        assert_eq!(ResponseKeys::from("venue").keys(), vec!["venue"]);
        assert_eq!(
            ResponseKeys::many(&["keywords", "groups", "warning"]).keys(),
            vec!["keywords", "groups", "warning"]
        );
    }
}

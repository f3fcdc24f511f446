//! Error payloads returned over the wire

use serde::{Deserialize, Serialize};

use crate::validate::ErrorLocation;

/// A plain error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub message: String,
}

/// One parameter violation, possibly carrying nested violations for
/// array/object fields. Self-referential to unbounded depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValidationError {
    pub msg: String,
    pub param: String,
    pub value: String,
    pub location: ErrorLocation,
    #[serde(
        rename = "nestedErrors",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nested_errors: Option<Vec<ParameterValidationError>>,
}

/// The body of a 400 response listing every parameter violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    /// Error message
    pub message: String,
    pub errors: Vec<ParameterValidationError>,
}

contract!(ErrorBody => "Error");
contract!(ParameterValidationError => "ParameterValidationError");
contract!(ValidationErrorBody => "ValidationError");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_errors_round_trip() {
        let value = json!({
            "msg": "invalid tenants",
            "param": "tenants",
            "value": "[...]",
            "location": "body",
            "nestedErrors": [{
                "msg": "required field 'first_name' is missing",
                "param": "tenants[0].first_name",
                "value": "",
                "location": "body"
            }]
        });
        let error: ParameterValidationError = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(error.nested_errors.as_ref().unwrap().len(), 1);
        assert_eq!(serde_json::to_value(&error).unwrap(), value);
    }
}

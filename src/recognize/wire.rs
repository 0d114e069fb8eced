use crate::recognize::error::RecognizeError;
use crate::recognize::vars::VariableEnvironment;
use serde::{Deserialize, Serialize};

/// Body of `POST <endpoint>/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateRequest<'a> {
    pub image: &'a str,
    pub dict_of_vars: &'a VariableEnvironment,
}

/// One recognized expression returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionRecord {
    #[serde(rename = "expr")]
    pub expression: String,
    #[serde(rename = "result")]
    pub result_value: String,
    #[serde(rename = "assign")]
    pub is_assignment: bool,
}

impl RecognitionRecord {
    pub fn new(expression: &str, result_value: &str, is_assignment: bool) -> Self {
        Self {
            expression: expression.to_string(),
            result_value: result_value.to_string(),
            is_assignment,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CalculateResponse {
    data: Vec<RecognitionRecord>,
}

/// Parse a response body, rejecting anything that does not match the record
/// shape exactly (missing fields, wrong types, non-JSON).
pub fn parse_response(body: &str) -> Result<Vec<RecognitionRecord>, RecognizeError> {
    serde_json::from_str::<CalculateResponse>(body)
        .map(|resp| resp.data)
        .map_err(|e| RecognizeError::Malformed(e.to_string()))
}

pub fn encode_request(image: &str, vars: &VariableEnvironment) -> Result<Vec<u8>, RecognizeError> {
    serde_json::to_vec(&CalculateRequest {
        image,
        dict_of_vars: vars,
    })
    .map_err(|e| RecognizeError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_records() {
        let body = r#"{"data":[
            {"expr":"x","result":"5","assign":true},
            {"expr":"x+2","result":"7","assign":false}
        ]}"#;
        let records = parse_response(body).expect("parse");
        assert_eq!(
            records,
            vec![
                RecognitionRecord::new("x", "5", true),
                RecognitionRecord::new("x+2", "7", false),
            ]
        );
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let body = r#"{"status":"ok","data":[{"expr":"1+1","result":"2","assign":false,"conf":0.9}]}"#;
        assert_eq!(parse_response(body).expect("parse").len(), 1);
    }

    #[test]
    fn empty_data_is_valid() {
        assert_eq!(parse_response(r#"{"data":[]}"#).expect("parse"), vec![]);
    }

    #[test]
    fn missing_field_is_reported() {
        let err = parse_response(r#"{"data":[{"expr":"x","assign":true}]}"#).unwrap_err();
        match err {
            RecognizeError::Malformed(msg) => assert!(msg.contains("result"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(matches!(
            parse_response(r#"{"data":[{"expr":"x","result":5,"assign":true}]}"#),
            Err(RecognizeError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"data":[{"expr":"x","result":"5","assign":"yes"}]}"#),
            Err(RecognizeError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"data":{"expr":"x"}}"#),
            Err(RecognizeError::Malformed(_))
        ));
    }

    #[test]
    fn non_json_and_missing_data_are_rejected() {
        assert!(matches!(
            parse_response("<html>502</html>"),
            Err(RecognizeError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"message":"ok"}"#),
            Err(RecognizeError::Malformed(_))
        ));
    }

    #[test]
    fn request_uses_service_field_names() {
        let mut vars = VariableEnvironment::default();
        vars.insert("x", "5");
        let body = encode_request("data:image/png;base64,AAAA", &vars).expect("encode");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["image"], "data:image/png;base64,AAAA");
        assert_eq!(value["dict_of_vars"]["x"], "5");
    }
}

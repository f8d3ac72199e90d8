//! Lookup input and its wire form.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Admission number must not be empty")]
    EmptyIdentifier,

    #[error("First name must not be empty")]
    EmptyName,
}

/// Admission number and first name for one lookup. Both are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultQuery {
    identifier: String,
    name: String,
}

impl ResultQuery {
    pub fn new(identifier: impl AsRef<str>, name: impl AsRef<str>) -> Result<Self, QueryError> {
        let identifier = identifier.as_ref().trim();
        let name = name.as_ref().trim();
        if identifier.is_empty() {
            return Err(QueryError::EmptyIdentifier);
        }
        if name.is_empty() {
            return Err(QueryError::EmptyName);
        }
        Ok(Self {
            identifier: identifier.to_string(),
            name: name.to_string(),
        })
    }

    /// Admission number.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// First name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// JSON body sent to the results endpoint.
    pub fn to_request(&self) -> ResultRequest<'_> {
        ResultRequest {
            admission_no: &self.identifier,
            first_name: &self.name,
            turnstile_token: "",
        }
    }
}

/// Request body: `{"admissionNo", "firstName", "turnstileToken"}`. The token is always empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRequest<'a> {
    pub admission_no: &'a str,
    pub first_name: &'a str,
    pub turnstile_token: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let q = ResultQuery::new("  1234567890 \n", "\tAbebe ").unwrap();
        assert_eq!(q.identifier(), "1234567890");
        assert_eq!(q.name(), "Abebe");
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert_eq!(
            ResultQuery::new("   ", "Abebe").unwrap_err(),
            QueryError::EmptyIdentifier
        );
        assert_eq!(
            ResultQuery::new("1234567890", "").unwrap_err(),
            QueryError::EmptyName
        );
    }

    #[test]
    fn test_request_body_shape() {
        let q = ResultQuery::new("1234567890", "Abebe").unwrap();
        let body = serde_json::to_value(q.to_request()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "admissionNo": "1234567890",
                "firstName": "Abebe",
                "turnstileToken": ""
            })
        );
    }
}

//! Parsed results response.
//!
//! The upstream body is loosely typed: any student field may be missing, null, a string or a
//! number, and subject scores are strings or numbers. Everything is normalized here, once, so
//! callers read plain fields with `"N/A"` already filled in.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Placeholder for fields the API left out.
pub const UNAVAILABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("empty response body")]
    Empty,

    #[error("invalid response body: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Student block of the response. Every field defaults to [`UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInfo {
    pub full_name: String,
    pub admission_no: String,
    pub sex: String,
    pub school: String,
    pub stream: String,
    pub photo_url: String,
    pub print_url: String,
}

impl Default for StudentInfo {
    fn default() -> Self {
        Self {
            full_name: UNAVAILABLE.to_string(),
            admission_no: UNAVAILABLE.to_string(),
            sex: UNAVAILABLE.to_string(),
            school: UNAVAILABLE.to_string(),
            stream: UNAVAILABLE.to_string(),
            photo_url: UNAVAILABLE.to_string(),
            print_url: UNAVAILABLE.to_string(),
        }
    }
}

/// A subject score as sent by the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    Number(serde_json::Number),
    Text(String),
}

impl Score {
    /// Numeric value of the score.
    ///
    /// Numbers are used as is. Text counts only if it is made of ASCII digits with at most one
    /// decimal point (`"343"`, `"85.5"`); anything else (`"N/A"`, `"A+"`, `""`) is `0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            Score::Number(n) => n.as_f64().unwrap_or(0.0),
            Score::Text(s) => coerce_numeric(s),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{}", n),
            Score::Text(s) => f.write_str(s),
        }
    }
}

fn coerce_numeric(s: &str) -> f64 {
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = s.chars().filter(|&c| c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != s.chars().count() {
        return 0.0;
    }
    s.parse().unwrap_or(0.0)
}

/// One `{Subject, Result}` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectResult {
    pub subject: String,
    pub score: Score,
}

/// A parsed 200 response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPayload {
    pub student: StudentInfo,
    /// Subjects in API order. The last entry is the aggregate (see [`ResultPayload::total`]).
    pub subjects: Vec<SubjectResult>,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(rename = "studentInfo", default)]
    student_info: Option<WireStudent>,
    #[serde(default)]
    results: Option<Vec<WireSubject>>,
}

#[derive(Deserialize, Default)]
struct WireStudent {
    #[serde(rename = "FullName", default)]
    full_name: Option<Value>,
    #[serde(rename = "Admission_No", default)]
    admission_no: Option<Value>,
    #[serde(rename = "Sex", default)]
    sex: Option<Value>,
    #[serde(rename = "School", default)]
    school: Option<Value>,
    #[serde(rename = "Stream", default)]
    stream: Option<Value>,
    #[serde(rename = "Photo", default)]
    photo: Option<Value>,
    #[serde(rename = "print", default)]
    print: Option<Value>,
}

#[derive(Deserialize)]
struct WireSubject {
    #[serde(rename = "Subject", default)]
    subject: Option<Value>,
    #[serde(rename = "Result", default)]
    result: Option<Value>,
}

fn text_or_unavailable(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => UNAVAILABLE.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => UNAVAILABLE.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

fn score_from(value: Option<Value>) -> Score {
    match value {
        Some(Value::Number(n)) => Score::Number(n),
        other => Score::Text(text_or_unavailable(other)),
    }
}

impl From<WireStudent> for StudentInfo {
    fn from(w: WireStudent) -> Self {
        Self {
            full_name: text_or_unavailable(w.full_name),
            admission_no: text_or_unavailable(w.admission_no),
            sex: text_or_unavailable(w.sex),
            school: text_or_unavailable(w.school),
            stream: text_or_unavailable(w.stream),
            photo_url: text_or_unavailable(w.photo),
            print_url: text_or_unavailable(w.print),
        }
    }
}

impl ResultPayload {
    /// Parses a response body. A blank body is [`PayloadError::Empty`].
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        if body.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        let wire: WireResponse = serde_json::from_str(body)?;
        Ok(Self {
            student: wire.student_info.unwrap_or_default().into(),
            subjects: wire
                .results
                .unwrap_or_default()
                .into_iter()
                .map(|s| SubjectResult {
                    subject: text_or_unavailable(s.subject),
                    score: score_from(s.result),
                })
                .collect(),
        })
    }

    /// True when the response carried no subject entries (wrong inputs or unpublished results).
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The aggregate entry.
    ///
    /// The API puts the total as the last element of `results`. This is observed behavior, not a
    /// documented contract: a reordered response would make a subject score look like the total.
    pub fn total(&self) -> Option<&SubjectResult> {
        self.subjects.last()
    }

    /// Numeric aggregate score, `None` when there are no subjects. Non-numeric totals are `0.0`.
    pub fn aggregate_score(&self) -> Option<f64> {
        self.total().map(|t| t.score.as_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"{
        "studentInfo": {
            "FullName": "Abebe Kebede Tesfaye",
            "Admission_No": 1234567890,
            "Sex": "M",
            "School": "Addis Ababa Secondary",
            "Stream": "Natural Science",
            "Photo": "https://eaes.et/photo/1.jpg",
            "print": null
        },
        "results": [
            {"Subject": "Mathematics", "Result": "85"},
            {"Subject": "English", "Result": 78},
            {"Subject": "Total", "Result": "343"}
        ]
    }"#;

    #[test]
    fn test_parse_full_body() {
        let payload = ResultPayload::parse(FULL_BODY).unwrap();

        assert_eq!(payload.student.full_name, "Abebe Kebede Tesfaye");
        assert_eq!(payload.student.admission_no, "1234567890");
        assert_eq!(payload.student.stream, "Natural Science");
        assert_eq!(payload.student.print_url, UNAVAILABLE);
        assert_eq!(payload.subjects.len(), 3);
        assert_eq!(payload.subjects[1].score.to_string(), "78");
    }

    #[test]
    fn test_aggregate_is_last_entry() {
        let payload = ResultPayload::parse(
            r#"{"studentInfo": {}, "results": [
                {"Subject": "Math", "Result": "85"},
                {"Subject": "Total", "Result": "343"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(payload.total().unwrap().subject, "Total");
        assert_eq!(payload.aggregate_score(), Some(343.0));
    }

    #[test]
    fn test_aggregate_non_numeric_is_zero() {
        let payload = ResultPayload::parse(
            r#"{"results": [
                {"Subject": "Math", "Result": "85"},
                {"Subject": "Total", "Result": "N/A"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(payload.aggregate_score(), Some(0.0));
    }

    #[test]
    fn test_aggregate_numeric_json_value() {
        let payload =
            ResultPayload::parse(r#"{"results": [{"Subject": "Total", "Result": 412.5}]}"#).unwrap();
        assert_eq!(payload.aggregate_score(), Some(412.5));
    }

    #[test]
    fn test_aggregate_missing_result_field_is_zero() {
        let payload = ResultPayload::parse(r#"{"results": [{"Subject": "Total"}]}"#).unwrap();
        assert_eq!(payload.total().unwrap().score, Score::Text(UNAVAILABLE.to_string()));
        assert_eq!(payload.aggregate_score(), Some(0.0));
    }

    #[test]
    fn test_empty_results() {
        let payload = ResultPayload::parse(r#"{"studentInfo": {}, "results": []}"#).unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.aggregate_score(), None);
    }

    #[test]
    fn test_missing_student_info_defaults() {
        let payload = ResultPayload::parse(r#"{"results": []}"#).unwrap();
        assert_eq!(payload.student, StudentInfo::default());
    }

    #[test]
    fn test_blank_body_is_empty_error() {
        assert!(matches!(ResultPayload::parse("  \n"), Err(PayloadError::Empty)));
    }

    #[test]
    fn test_garbage_body_is_invalid() {
        assert!(matches!(
            ResultPayload::parse("<html>busy</html>"),
            Err(PayloadError::Invalid(_))
        ));
        assert!(matches!(
            ResultPayload::parse(r#"{"results": "none"}"#),
            Err(PayloadError::Invalid(_))
        ));
    }

    #[test]
    fn test_score_coercion() {
        let text = |s: &str| Score::Text(s.to_string()).as_number();
        assert_eq!(text("343"), 343.0);
        assert_eq!(text("85.5"), 85.5);
        assert_eq!(text("N/A"), 0.0);
        assert_eq!(text(""), 0.0);
        assert_eq!(text("."), 0.0);
        assert_eq!(text("1.2.3"), 0.0);
        assert_eq!(text("-5"), 0.0);
        assert_eq!(text(" 343"), 0.0);
    }
}

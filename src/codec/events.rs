//! Status event types and the line decoder
//!
//! Each logical line of the chat stream is one JSON record:
//! `{"status": "processing" | "complete" | "error", "data": <string>}`.
//! A line either decodes into exactly one [`StatusEvent`] or is rejected as
//! a whole; a rejected line is discarded by the caller and the stream
//! continues.

use serde::Deserialize;
use tracing::warn;

/// One decoded unit of progress from the chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// A text fragment to append to the answer. Empty fragments are valid
    /// no-ops.
    Processing { data: String },
    /// The server finished generating. The payload is informational only
    /// and is not displayed.
    Complete { data: Option<String> },
    /// The server reported a failure; `data` is the human-readable message.
    Error { data: String },
}

impl StatusEvent {
    /// Returns the wire status name for logging.
    pub fn status_name(&self) -> &'static str {
        match self {
            StatusEvent::Processing { .. } => "processing",
            StatusEvent::Complete { .. } => "complete",
            StatusEvent::Error { .. } => "error",
        }
    }
}

/// Errors that can occur while decoding a status line.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusParseError {
    /// The line is not a well-formed JSON record
    InvalidJson { source: String },
    /// The record carries a status outside the recognized set
    UnknownStatus(String),
    /// Missing data payload for a status that requires one
    MissingData { status: String },
}

impl std::fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusParseError::InvalidJson { source } => {
                write!(f, "Invalid JSON in status line: {}", source)
            }
            StatusParseError::UnknownStatus(status) => {
                write!(f, "Unknown status value: {}", status)
            }
            StatusParseError::MissingData { status } => {
                write!(f, "Missing data for status: {}", status)
            }
        }
    }
}

impl std::error::Error for StatusParseError {}

/// Raw wire record before status validation.
#[derive(Debug, Deserialize)]
struct WireRecord {
    status: String,
    #[serde(default)]
    data: Option<String>,
}

/// Decode one non-blank logical line into a [`StatusEvent`].
///
/// An unrecognized status value is an error just like malformed JSON; the
/// caller treats both the same way (discard the line, log, continue).
pub fn decode_status_line(line: &str) -> Result<StatusEvent, StatusParseError> {
    let record: WireRecord =
        serde_json::from_str(line).map_err(|e| StatusParseError::InvalidJson {
            source: e.to_string(),
        })?;

    match record.status.as_str() {
        "processing" => match record.data {
            Some(data) => Ok(StatusEvent::Processing { data }),
            None => Err(StatusParseError::MissingData {
                status: record.status,
            }),
        },
        "complete" => Ok(StatusEvent::Complete { data: record.data }),
        "error" => match record.data {
            Some(data) => Ok(StatusEvent::Error { data }),
            None => Err(StatusParseError::MissingData {
                status: record.status,
            }),
        },
        _ => Err(StatusParseError::UnknownStatus(record.status)),
    }
}

/// Decode a logical line, discarding blanks and malformed records.
///
/// This is the lossy boundary both transports share: a blank line is
/// skipped, a malformed one is logged and dropped, and the stream continues
/// either way. A single bad line never terminates the session.
pub fn decode_or_discard(line: &str) -> Option<StatusEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match decode_status_line(trimmed) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(line = trimmed, error = %e, "discarding malformed status line");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_processing_fragment() {
        let event = decode_status_line(r#"{"status": "processing", "data": "안녕하"}"#).unwrap();
        assert_eq!(
            event,
            StatusEvent::Processing {
                data: "안녕하".to_string()
            }
        );
        assert_eq!(event.status_name(), "processing");
    }

    #[test]
    fn test_decode_processing_empty_fragment() {
        // Empty string is a permitted no-op fragment
        let event = decode_status_line(r#"{"status": "processing", "data": ""}"#).unwrap();
        assert_eq!(
            event,
            StatusEvent::Processing {
                data: String::new()
            }
        );
    }

    #[test]
    fn test_decode_complete_with_payload() {
        let event = decode_status_line(r#"{"status": "complete", "data": "Stream finished"}"#)
            .unwrap();
        assert_eq!(
            event,
            StatusEvent::Complete {
                data: Some("Stream finished".to_string())
            }
        );
    }

    #[test]
    fn test_decode_complete_without_payload() {
        let event = decode_status_line(r#"{"status": "complete"}"#).unwrap();
        assert_eq!(event, StatusEvent::Complete { data: None });
    }

    #[test]
    fn test_decode_error_record() {
        let event =
            decode_status_line(r#"{"status": "error", "data": "챗봇 응답 생성에 실패했습니다."}"#)
                .unwrap();
        assert_eq!(
            event,
            StatusEvent::Error {
                data: "챗봇 응답 생성에 실패했습니다.".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_record_is_invalid_json() {
        let result = decode_status_line(r#"{"status": "processing", "da"#);
        assert!(matches!(result, Err(StatusParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_non_json_line_is_invalid_json() {
        let result = decode_status_line("plain text, not a record");
        assert!(matches!(result, Err(StatusParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = decode_status_line(r#"{"status": "finished", "data": "x"}"#);
        assert_eq!(
            result,
            Err(StatusParseError::UnknownStatus("finished".to_string()))
        );
    }

    #[test]
    fn test_processing_without_data_rejected() {
        let result = decode_status_line(r#"{"status": "processing"}"#);
        assert_eq!(
            result,
            Err(StatusParseError::MissingData {
                status: "processing".to_string()
            })
        );
    }

    #[test]
    fn test_error_without_data_rejected() {
        let result = decode_status_line(r#"{"status": "error"}"#);
        assert_eq!(
            result,
            Err(StatusParseError::MissingData {
                status: "error".to_string()
            })
        );
    }

    #[test]
    fn test_decode_or_discard_skips_blank_and_malformed_lines() {
        assert_eq!(decode_or_discard(""), None);
        assert_eq!(decode_or_discard("   "), None);
        assert_eq!(decode_or_discard("not json"), None);
        assert_eq!(
            decode_or_discard(r#"  {"status": "processing", "data": "ok"}  "#),
            Some(StatusEvent::Processing {
                data: "ok".to_string()
            })
        );
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            StatusParseError::UnknownStatus("foo".to_string()).to_string(),
            "Unknown status value: foo"
        );
        assert_eq!(
            StatusParseError::MissingData {
                status: "error".to_string()
            }
            .to_string(),
            "Missing data for status: error"
        );
        let err = StatusParseError::InvalidJson {
            source: "expected value".to_string(),
        };
        assert!(err.to_string().contains("Invalid JSON"));
    }
}

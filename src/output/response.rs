//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use buildenv::error::Hint;
use buildenv::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

/// Terminal notes that accompany a JSON result on stderr.
///
/// Validation and config errors repeat their hints; a version comparison that
/// fell back to text ordering says so.
fn status_lines(result: &Result<serde_json::Value>) -> Vec<String> {
    match result {
        Ok(data) => {
            if data.get("lexicalFallback") == Some(&serde_json::Value::Bool(true)) {
                vec!["Note: versions contain non-numeric segments; compared as text".to_string()]
            } else {
                Vec::new()
            }
        }
        Err(err) => match err.code {
            ErrorCode::InternalIoError
            | ErrorCode::InternalJsonError
            | ErrorCode::InternalUnexpected => Vec::new(),
            _ => err
                .hints
                .iter()
                .map(|hint| format!("Hint: {}", hint.message))
                .collect(),
        },
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    for line in status_lines(&result) {
        crate::tty::status(&line);
    }

    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error() {
        let value = serde_json::to_value(CliResponse::success(json!({"larger": "1.2"}))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["larger"], "1.2");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let err = Error::validation_invalid_argument("platform", "Unknown platform: amiga", None, None)
            .with_hint("Use posix or windows");
        let value = serde_json::to_value(CliResponse::<()>::from_error(&err)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "validation.invalid_argument");
        assert_eq!(value["error"]["hints"][0]["message"], "Use posix or windows");
    }

    #[test]
    fn hints_omitted_when_empty() {
        let err = Error::internal_unexpected("boom");
        let value = serde_json::to_value(CliResponse::<()>::from_error(&err)).unwrap();
        assert!(value["error"].get("hints").is_none());
    }

    #[test]
    fn validation_errors_exit_with_two() {
        let result: Result<((), i32)> = Err(Error::validation_missing_argument(vec![
            "target".to_string(),
        ]));
        let (json, code) = map_cmd_result_to_json(result);
        assert!(json.is_err());
        assert_eq!(code, 2);
    }

    #[test]
    fn internal_errors_exit_with_one() {
        assert_eq!(exit_code_for_error(ErrorCode::InternalIoError), 1);
        assert_eq!(exit_code_for_error(ErrorCode::ConfigInvalidJson), 2);
    }

    #[test]
    fn lexical_fallback_is_noted() {
        let lines = status_lines(&Ok(json!({"ordering": "greater", "lexicalFallback": true})));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("compared as text"));

        let lines = status_lines(&Ok(json!({"ordering": "less", "lexicalFallback": false})));
        assert!(lines.is_empty());
    }

    #[test]
    fn validation_hints_are_repeated() {
        let err = Error::validation_missing_argument(vec!["--registry".to_string()])
            .with_hint("Set BUILDENV_REGISTRY");
        assert_eq!(status_lines(&Err(err)), vec!["Hint: Set BUILDENV_REGISTRY".to_string()]);
    }

    #[test]
    fn internal_error_hints_stay_in_json() {
        let err = Error::internal_unexpected("boom").with_hint("retry");
        assert!(status_lines(&Err(err)).is_empty());
    }

    #[test]
    fn success_keeps_command_exit_code() {
        let (json, code) = map_cmd_result_to_json(Ok((json!({"ok": true}), 0)));
        assert_eq!(json.unwrap()["ok"], true);
        assert_eq!(code, 0);
    }
}

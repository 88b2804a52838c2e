//! The client-visible shape of an error.
//!
//! The transport layer builds one of these from any classified error:
//! the `status_code` and `code` properties are used verbatim when
//! present, otherwise the kind decides the status and the subtype id
//! becomes the code. Messages of `internal_error`-rooted failures are
//! replaced by a generic sentence; the full chain belongs in the logs.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::property::{CODE, STATUS_CODE};
use crate::{DATA_UNAVAILABLE, ILLEGAL_ARGUMENT, INTERNAL_ERROR};

/// What clients see instead of an internal failure message.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn from_error(error: &Error) -> Self {
        let status = error
            .property(STATUS_CODE)
            .unwrap_or_else(|| default_status(error));
        let code = error
            .property(CODE)
            .unwrap_or_else(|| error.subtype().id().to_string());
        let message = if error.is_of_kind(&INTERNAL_ERROR) {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            error.message().to_string()
        };
        ErrorResponse {
            code,
            message,
            status,
        }
    }
}

fn default_status(error: &Error) -> u16 {
    if error.is_of_kind(&ILLEGAL_ARGUMENT) {
        400
    } else if error.is_of_kind(&DATA_UNAVAILABLE) {
        404
    } else {
        // internal_error and any kind outside the default table.
        500
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use crate::taxonomy::Subtype;

    use super::*;

    static REJECTED: LazyLock<Subtype> =
        LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("response_test.rejected"));
    static ABSENT: LazyLock<Subtype> =
        LazyLock::new(|| DATA_UNAVAILABLE.subtype("response_test.absent"));
    static BROKEN: LazyLock<Subtype> =
        LazyLock::new(|| INTERNAL_ERROR.subtype("response_test.broken"));

    #[test]
    fn illegal_argument_defaults_to_400_and_echoes_message() {
        let err = REJECTED.error("query cannot be 'fail'");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(
            response,
            ErrorResponse {
                code: "response_test.rejected".to_string(),
                message: "query cannot be 'fail'".to_string(),
                status: 400,
            }
        );
    }

    #[test]
    fn data_unavailable_defaults_to_404() {
        let err = ABSENT.error("transaction not found");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "transaction not found");
    }

    #[test]
    fn internal_error_is_sanitized() {
        let err = BROKEN.wrap_source("no such table: transactions", "search transactions failed");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, 500);
        assert_eq!(response.code, "response_test.broken");
        assert_eq!(response.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn decorated_internal_error_keeps_classification() {
        let inner = BROKEN.error("write failed");
        let outer = Error::decorate(inner, "saving transaction failed");
        let response = ErrorResponse::from_error(&outer);
        assert_eq!(response.status, 500);
        assert_eq!(response.code, "response_test.broken");
        assert_eq!(response.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn explicit_properties_win_over_defaults() {
        let err = REJECTED
            .error("cannot delete user with existing UTXOs")
            .with_property(STATUS_CODE, 400u16)
            .with_property(CODE, "error-user-has-existing-utxos");
        let decorated = Error::decorate(err, "during cascade delete");
        let response = ErrorResponse::from_error(&decorated);
        assert_eq!(response.status, 400);
        assert_eq!(response.code, "error-user-has-existing-utxos");
    }

    #[test]
    fn serializes_all_three_fields() {
        let err = REJECTED.error("nope");
        let response = ErrorResponse::from_error(&err);
        let json = serde_json::to_value(&response).expect("serializable response");
        assert_eq!(
            json,
            serde_json::json!({
                "code": "response_test.rejected",
                "message": "nope",
                "status": 400,
            })
        );
    }
}

//! The wallet's error taxonomy and preconstructed errors.
//!
//! How the codes are built:
//! 1. the prefix, always "error"
//! 2. the model name, e.g. "user"
//! 3. the reason, e.g. "not-found"

use std::sync::LazyLock;

use spv_errors::{
    CODE, DATA_UNAVAILABLE, Error, ILLEGAL_ARGUMENT, INTERNAL_ERROR, STATUS_CODE, Subtype,
};

// ─────────────────────────────────────────────────────────────────────────────
// Layer subtypes
// ─────────────────────────────────────────────────────────────────────────────

/// A datastore read failed.
pub static QUERY_FAILED: LazyLock<Subtype> =
    LazyLock::new(|| INTERNAL_ERROR.subtype("repository.query_failed"));

/// A datastore write failed.
pub static WRITE_FAILED: LazyLock<Subtype> =
    LazyLock::new(|| INTERNAL_ERROR.subtype("repository.write_failed"));

/// The requested record does not exist.
pub static NOT_FOUND: LazyLock<Subtype> = LazyLock::new(|| DATA_UNAVAILABLE.subtype("not_found"));

/// A query parameter holds a value the service does not accept.
pub static UNEXPECTED_QUERY_VALUE: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("unexpected_query_value"));

/// A required field is empty or absent.
pub static MISSING_FIELD: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("missing_field"));

/// A paymail address fails to parse.
pub static INVALID_PAYMAIL: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("paymail.invalid_address"));

/// The caller is not allowed to perform the operation.
pub static UNAUTHORIZED: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("auth.unauthorized"));

/// The operation conflicts with the current state of the user.
pub static USER_INVALID_STATE: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("user.invalid_state"));

/// A transaction value is outside the accepted range.
pub static TRANSACTION_INVALID_VALUE: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("transaction.invalid_value"));

/// The engine was built without a required collaborator.
pub static ENGINE_MISCONFIGURED: LazyLock<Subtype> =
    LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("engine.misconfigured"));

// ─────────────────────────────────────────────────────────────────────────────
// Preconstructed errors
// ─────────────────────────────────────────────────────────────────────────────

/// ErrUserHasUnspentUtxos is when a user still owns unspent outputs and
/// cannot be deleted.
pub static ERR_USER_HAS_UNSPENT_UTXOS: LazyLock<Error> = LazyLock::new(|| {
    USER_INVALID_STATE
        .error("cannot delete user with existing UTXOs")
        .with_property(STATUS_CODE, 400u16)
        .with_property(CODE, "error-user-has-existing-utxos")
});

/// ErrUserAlreadyExists is when a user with the given id already exists.
pub static ERR_USER_ALREADY_EXISTS: LazyLock<Error> = LazyLock::new(|| {
    USER_INVALID_STATE
        .error("user already exists")
        .with_property(STATUS_CODE, 409u16)
        .with_property(CODE, "error-user-already-exists")
});

/// ErrUserNotFound is when a user could not be found.
pub static ERR_USER_NOT_FOUND: LazyLock<Error> = LazyLock::new(|| {
    NOT_FOUND
        .error("user not found")
        .with_property(CODE, "error-user-not-found")
});

/// ErrTransactionNotFound is when a transaction could not be found.
pub static ERR_TRANSACTION_NOT_FOUND: LazyLock<Error> = LazyLock::new(|| {
    NOT_FOUND
        .error("transaction not found")
        .with_property(CODE, "error-transaction-not-found")
});

/// ErrPaymailInvalid is when the paymail address is not `alias@domain`.
pub static ERR_PAYMAIL_INVALID: LazyLock<Error> = LazyLock::new(|| {
    INVALID_PAYMAIL
        .error("paymail address is invalid")
        .with_property(CODE, "error-paymail-address-invalid")
});

/// ErrOutputValueTooLow is when the satoshis value is too low on a
/// transaction.
pub static ERR_OUTPUT_VALUE_TOO_LOW: LazyLock<Error> = LazyLock::new(|| {
    TRANSACTION_INVALID_VALUE
        .error("output value is too low")
        .with_property(CODE, "error-transaction-output-value-too-low")
});

/// ErrMissingAuthHeader is when a request does not carry the auth header.
pub static ERR_MISSING_AUTH_HEADER: LazyLock<Error> = LazyLock::new(|| {
    UNAUTHORIZED
        .error("missing auth header")
        .with_property(STATUS_CODE, 401u16)
        .with_property(CODE, "error-unauthorized-missing-auth-header")
});

/// ErrNotAnAdminKey is when the xpub from the auth header is not the
/// admin key.
pub static ERR_NOT_AN_ADMIN_KEY: LazyLock<Error> = LazyLock::new(|| {
    UNAUTHORIZED
        .error("xpub provided is not an admin key")
        .with_property(STATUS_CODE, 401u16)
        .with_property(CODE, "error-unauthorized-not-an-admin-key")
});

/// ErrDatastoreRequired is when an engine is built without a datastore.
pub static ERR_DATASTORE_REQUIRED: LazyLock<Error> = LazyLock::new(|| {
    ENGINE_MISCONFIGURED
        .error("datastore is required")
        .with_property(CODE, "error-datastore-required")
});

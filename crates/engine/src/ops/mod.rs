//! Service layer: validation and context on top of the repository.
//!
//! Methods here never let a repository error cross unchanged unless the
//! operation has no context to add; everything else is decorated, which
//! keeps the classification of the underlying failure.

use crate::ResultEngine;
use crate::errors::MISSING_FIELD;

pub mod transactions;
pub mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await.map_err(|err| {
            crate::errors::WRITE_FAILED.wrap_source(&err, "begin datastore transaction failed")
        })?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await.map_err(|err| {
                    crate::errors::WRITE_FAILED
                        .wrap_source(&err, "commit datastore transaction failed")
                })?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

fn require_non_empty(value: &str, field: &str) -> ResultEngine<()> {
    if value.trim().is_empty() {
        return Err(MISSING_FIELD.error(format!("missing required field: {field}")));
    }
    Ok(())
}

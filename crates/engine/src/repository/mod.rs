//! Repository layer: datastore access with classified failures.
//!
//! Every outward-facing failure is a subtype under `internal_error`
//! (`repository.query_failed`, `repository.write_failed`), except when
//! the store distinguishes "not found", which surfaces as
//! `data_unavailable.not_found`. Driver errors are attached as the
//! innermost cause and never cross this boundary raw.

pub mod paymails;
pub mod transactions;
pub mod users;
pub mod utxos;

//! SPV wallet engine: domain services over the wallet datastore.
//!
//! The engine is layered. `repository` talks to the datastore and returns
//! classified failures; `ops` holds the service methods on [`Engine`]
//! that validate inputs and add context while preserving classification;
//! `errors` registers the wallet's error taxonomy and its preconstructed
//! errors.

use sea_orm::DatabaseConnection;

pub use ops::transactions::{NewTransaction, TransactionFilter};
pub use ops::users::{NewUser, NewUtxo, UserWithPaymails};
pub use paymail::Paymail;
pub use transactions::TransactionStatus;

pub mod errors;
pub mod paymails;
pub mod transactions;
pub mod users;
pub mod utxos;

mod ops;
mod paymail;
mod repository;

pub type ResultEngine<T> = Result<T, spv_errors::Error>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    database: Option<DatabaseConnection>,
}

impl EngineBuilder {
    pub fn database(mut self, database: DatabaseConnection) -> Self {
        self.database = Some(database);
        self
    }

    pub fn build(self) -> ResultEngine<Engine> {
        let database = self
            .database
            .ok_or_else(|| errors::ERR_DATASTORE_REQUIRED.clone())?;
        Ok(Engine { database })
    }
}

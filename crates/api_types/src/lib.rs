use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    /// Search request for transactions.
    ///
    /// `query` filters by transaction status; the set of accepted values
    /// is validated by the engine.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SearchTransactions {
        pub query: Option<String>,
        pub user_id: Option<String>,
        /// 1-based page number (default 1).
        pub page: Option<u64>,
        /// Page size (default 50).
        pub size: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SearchTransactionsResponse {
        pub content: Vec<TransactionView>,
        pub page: u64,
        pub size: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordTransaction {
        pub id: String,
        pub user_id: String,
        pub status: String,
        pub satoshis: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub user_id: String,
        pub status: String,
        pub satoshis: i64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreateUser {
        pub id: String,
        pub pub_key: String,
        /// Optional paymail address, `alias@domain`.
        pub paymail: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub pub_key: String,
        pub paymails: Vec<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UtxoView {
        pub tx_id: String,
        pub vout: i32,
        pub satoshis: i64,
    }
}

//! Transactions table and the status domain enum.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use spv_errors::Error;

use crate::errors::UNEXPECTED_QUERY_VALUE;

/// Lifecycle of a tracked transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Broadcast,
    Mined,
    Reverted,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Broadcast => "broadcast",
            Self::Mined => "mined",
            Self::Reverted => "reverted",
        }
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "broadcast" => Ok(Self::Broadcast),
            "mined" => Ok(Self::Mined),
            "reverted" => Ok(Self::Reverted),
            other => Err(UNEXPECTED_QUERY_VALUE
                .error(format!("invalid transaction status: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Transaction id (txid).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub satoshis: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

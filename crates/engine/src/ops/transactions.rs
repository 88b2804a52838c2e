//! Transaction services: search, record, fetch.

use chrono::Utc;
use sea_orm::ActiveValue;
use spv_errors::Error;

use crate::errors::{ERR_OUTPUT_VALUE_TOO_LOW, UNEXPECTED_QUERY_VALUE};
use crate::{Engine, ResultEngine, TransactionStatus, repository, transactions};

use super::require_non_empty;

const MAX_PAGE_SIZE: u64 = 1000;

/// Search conditions for transactions.
///
/// `query` filters by status and is validated against the known status
/// set before it reaches the repository.
#[derive(Clone, Debug)]
pub struct TransactionFilter {
    pub user_id: Option<String>,
    pub query: Option<String>,
    /// 1-based page number.
    pub page: u64,
    pub size: u64,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        TransactionFilter {
            user_id: None,
            query: None,
            page: 1,
            size: 50,
        }
    }
}

/// A transaction to record.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub id: String,
    pub user_id: String,
    pub status: TransactionStatus,
    pub satoshis: i64,
}

fn parse_query(query: Option<&str>) -> ResultEngine<Option<TransactionStatus>> {
    let Some(raw) = query else {
        return Ok(None);
    };
    TransactionStatus::try_from(raw)
        .map(Some)
        .map_err(|_| UNEXPECTED_QUERY_VALUE.error(format!("query cannot be '{raw}'")))
}

fn validate_paging(filter: &TransactionFilter) -> ResultEngine<()> {
    if filter.page == 0 {
        return Err(UNEXPECTED_QUERY_VALUE.error("page numbering starts at 1"));
    }
    if filter.size == 0 || filter.size > MAX_PAGE_SIZE {
        return Err(UNEXPECTED_QUERY_VALUE.error(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

impl Engine {
    /// Searches transactions matching `filter`.
    ///
    /// Repository failures are decorated so the log shows what was being
    /// attempted while the classification stays intact.
    pub async fn search_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<transactions::Model>> {
        let status = parse_query(filter.query.as_deref())?;
        validate_paging(filter)?;
        let offset = (filter.page - 1) * filter.size;

        repository::transactions::search(
            &self.database,
            filter.user_id.as_deref(),
            status,
            offset,
            filter.size,
        )
        .await
        .map_err(|err| Error::decorate(err, "searching for transactions failed"))
    }

    /// Records a transaction for a user.
    pub async fn record_transaction(
        &self,
        new: NewTransaction,
    ) -> ResultEngine<transactions::Model> {
        require_non_empty(&new.id, "id")?;
        require_non_empty(&new.user_id, "user_id")?;
        if new.satoshis <= 0 {
            return Err(ERR_OUTPUT_VALUE_TOO_LOW.clone());
        }

        let model = transactions::ActiveModel {
            id: ActiveValue::Set(new.id),
            user_id: ActiveValue::Set(new.user_id),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            satoshis: ActiveValue::Set(new.satoshis),
            created_at: ActiveValue::Set(Utc::now()),
        };
        repository::transactions::insert(&self.database, model).await
    }

    /// Returns the transaction with the given id.
    pub async fn transaction_by_id(&self, id: &str) -> ResultEngine<transactions::Model> {
        require_non_empty(id, "id")?;
        repository::transactions::by_id(&self.database, id).await
    }
}

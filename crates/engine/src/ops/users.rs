//! User services: registration, lookup, deletion, UTXO listing.

use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};
use spv_errors::Error;
use uuid::Uuid;

use crate::errors::{ERR_USER_ALREADY_EXISTS, ERR_USER_HAS_UNSPENT_UTXOS};
use crate::{Engine, Paymail, ResultEngine, paymails, repository, users, utxos};

use super::{require_non_empty, with_tx};

/// A user to register.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub id: String,
    pub pub_key: String,
    /// Optional paymail address, `alias@domain`.
    pub paymail: Option<String>,
}

/// A tracked output to attach to a user.
#[derive(Clone, Debug)]
pub struct NewUtxo {
    pub tx_id: String,
    pub vout: i32,
    pub user_id: String,
    pub satoshis: i64,
}

/// A user together with its registered paymails.
#[derive(Clone, Debug)]
pub struct UserWithPaymails {
    pub user: users::Model,
    pub paymails: Vec<paymails::Model>,
}

impl Engine {
    /// Registers a user, optionally with a paymail address.
    pub async fn create_user(&self, new: NewUser) -> ResultEngine<users::Model> {
        require_non_empty(&new.id, "id")?;
        require_non_empty(&new.pub_key, "pub_key")?;
        let paymail = new
            .paymail
            .as_deref()
            .map(str::parse::<Paymail>)
            .transpose()
            .map_err(|err| Error::decorate(err, "invalid paymail during user creation"))?;

        if repository::users::exists(&self.database, &new.id).await? {
            return Err(ERR_USER_ALREADY_EXISTS.clone());
        }

        let model = users::ActiveModel {
            id: ActiveValue::Set(new.id),
            pub_key: ActiveValue::Set(new.pub_key),
            created_at: ActiveValue::Set(Utc::now()),
        };

        with_tx!(self, |db_tx| {
            let user = repository::users::insert(&db_tx, model).await?;
            if let Some(paymail) = paymail {
                let paymail_model = paymails::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    alias: ActiveValue::Set(paymail.alias().to_string()),
                    domain: ActiveValue::Set(paymail.domain().to_string()),
                    user_id: ActiveValue::Set(user.id.clone()),
                };
                repository::paymails::insert(&db_tx, paymail_model).await?;
            }
            Ok(user)
        })
    }

    /// Returns a user with its paymails.
    pub async fn user_by_id(&self, id: &str) -> ResultEngine<UserWithPaymails> {
        require_non_empty(id, "id")?;
        let user = repository::users::by_id(&self.database, id).await?;
        let paymails = repository::paymails::for_user(&self.database, id)
            .await
            .map_err(|err| Error::decorate(err, "fetching user paymails failed"))?;
        Ok(UserWithPaymails { user, paymails })
    }

    /// Deletes a user and its associated paymails, transactions and
    /// spent outputs.
    ///
    /// A user that still owns unspent UTXOs cannot be deleted.
    pub async fn delete_user(&self, id: &str) -> ResultEngine<()> {
        require_non_empty(id, "id")?;
        let unspent = repository::utxos::count_unspent(&self.database, id)
            .await
            .map_err(|err| Error::decorate(err, "checking user UTXOs failed"))?;
        if unspent > 0 {
            return Err(ERR_USER_HAS_UNSPENT_UTXOS.clone());
        }

        with_tx!(self, |db_tx| {
            let user = repository::users::by_id(&db_tx, id).await?;
            repository::paymails::delete_for_user(&db_tx, id).await?;
            repository::utxos::delete_for_user(&db_tx, id).await?;
            repository::transactions::delete_for_user(&db_tx, id).await?;
            repository::users::delete(&db_tx, user).await?;
            Ok(())
        })
    }

    /// Attaches a tracked output to a user.
    pub async fn record_utxo(&self, new: NewUtxo) -> ResultEngine<utxos::Model> {
        require_non_empty(&new.tx_id, "tx_id")?;
        require_non_empty(&new.user_id, "user_id")?;
        repository::users::by_id(&self.database, &new.user_id).await?;

        let model = utxos::ActiveModel {
            tx_id: ActiveValue::Set(new.tx_id),
            vout: ActiveValue::Set(new.vout),
            user_id: ActiveValue::Set(new.user_id),
            satoshis: ActiveValue::Set(new.satoshis),
            spending_tx_id: ActiveValue::Set(None),
        };
        repository::utxos::insert(&self.database, model).await
    }

    /// Lists a user's unspent outputs.
    pub async fn user_utxos(&self, user_id: &str) -> ResultEngine<Vec<utxos::Model>> {
        require_non_empty(user_id, "user_id")?;
        repository::utxos::unspent_for_user(&self.database, user_id)
            .await
            .map_err(|err| Error::decorate(err, "listing user UTXOs failed"))
    }
}

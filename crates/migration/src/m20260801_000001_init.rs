//! Initial schema migration.
//!
//! Creates the wallet datastore from scratch:
//!
//! - `users`: wallet owners
//! - `paymails`: `alias@domain` addresses per user
//! - `transactions`: tracked transactions with a lifecycle status
//! - `utxos`: tracked outputs; a row is unspent while `spending_tx_id`
//!   is NULL

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    PubKey,
    CreatedAt,
}

#[derive(Iden)]
enum Paymails {
    Table,
    Id,
    Alias,
    Domain,
    UserId,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Status,
    Satoshis,
    CreatedAt,
}

#[derive(Iden)]
enum Utxos {
    Table,
    TxId,
    Vout,
    UserId,
    Satoshis,
    SpendingTxId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::PubKey).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Paymails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Paymails::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Paymails::Alias).string().not_null())
                    .col(ColumnDef::new(Paymails::Domain).string().not_null())
                    .col(ColumnDef::new(Paymails::UserId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-paymails-user_id")
                            .from(Paymails::Table, Paymails::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-paymails-alias-domain-unique")
                    .table(Paymails::Table)
                    .col(Paymails::Alias)
                    .col(Paymails::Domain)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::Satoshis)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-status")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Utxos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Utxos::TxId).string().not_null())
                    .col(ColumnDef::new(Utxos::Vout).integer().not_null())
                    .col(ColumnDef::new(Utxos::UserId).string().not_null())
                    .col(ColumnDef::new(Utxos::Satoshis).big_integer().not_null())
                    .col(ColumnDef::new(Utxos::SpendingTxId).string())
                    .primary_key(
                        Index::create()
                            .name("pk-utxos")
                            .col(Utxos::TxId)
                            .col(Utxos::Vout),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-utxos-user_id")
                            .from(Utxos::Table, Utxos::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-utxos-user_id-spending_tx_id")
                    .table(Utxos::Table)
                    .col(Utxos::UserId)
                    .col(Utxos::SpendingTxId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Utxos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Paymails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

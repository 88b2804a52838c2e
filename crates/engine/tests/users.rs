use engine::{Engine, NewUser, NewUtxo, errors};
use migration::MigratorTrait;
use sea_orm::Database;
use spv_errors::{CODE, ErrorResponse, STATUS_CODE};

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().unwrap()
}

fn new_user(id: &str, paymail: Option<&str>) -> NewUser {
    NewUser {
        id: id.to_string(),
        pub_key: format!("xpub-{id}"),
        paymail: paymail.map(str::to_string),
    }
}

#[tokio::test]
async fn create_and_fetch_user_with_paymail() {
    let engine = engine_with_db().await;

    engine
        .create_user(new_user("alice", Some("Alice@Example.com")))
        .await
        .unwrap();

    let found = engine.user_by_id("alice").await.unwrap();
    assert_eq!(found.user.id, "alice");
    assert_eq!(found.paymails.len(), 1);
    assert_eq!(found.paymails[0].alias, "alice");
    assert_eq!(found.paymails[0].domain, "example.com");
}

#[tokio::test]
async fn create_user_rejects_invalid_paymail() {
    let engine = engine_with_db().await;

    let err = engine
        .create_user(new_user("alice", Some("not-a-paymail")))
        .await
        .unwrap_err();

    // Decorated at the service edge, still classified as the paymail
    // validation failure.
    assert!(err.is_of_subtype(&errors::INVALID_PAYMAIL));
    assert_eq!(err.message(), "invalid paymail during user creation");
    assert_eq!(
        err.cause().map(|cause| cause.message().to_string()),
        Some("paymail address is invalid".to_string())
    );
    assert_eq!(
        err.property(CODE).as_deref(),
        Some("error-paymail-address-invalid")
    );
    assert_eq!(ErrorResponse::from_error(&err).status, 400);
}

#[tokio::test]
async fn duplicate_user_id_is_a_conflict() {
    let engine = engine_with_db().await;
    engine.create_user(new_user("alice", None)).await.unwrap();

    let err = engine
        .create_user(new_user("alice", None))
        .await
        .unwrap_err();

    assert_eq!(err.property(STATUS_CODE), Some(409));
    assert_eq!(
        err.property(CODE).as_deref(),
        Some("error-user-already-exists")
    );
    assert_eq!(ErrorResponse::from_error(&err).status, 409);
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let engine = engine_with_db().await;

    let err = engine.user_by_id("ghost").await.unwrap_err();

    assert!(err.is_of_subtype(&errors::NOT_FOUND));
    let response = ErrorResponse::from_error(&err);
    assert_eq!(response.status, 404);
    assert_eq!(response.code, "error-user-not-found");
}

#[tokio::test]
async fn delete_user_with_unspent_utxos_is_rejected() {
    let engine = engine_with_db().await;
    engine.create_user(new_user("alice", None)).await.unwrap();
    engine
        .record_utxo(NewUtxo {
            tx_id: "tx-1".to_string(),
            vout: 0,
            user_id: "alice".to_string(),
            satoshis: 5000,
        })
        .await
        .unwrap();

    let err = engine.delete_user("alice").await.unwrap_err();

    assert!(err.is_of_subtype(&errors::USER_INVALID_STATE));
    assert_eq!(err.message(), "cannot delete user with existing UTXOs");
    assert_eq!(err.property(STATUS_CODE), Some(400));
    assert_eq!(
        err.property(CODE).as_deref(),
        Some("error-user-has-existing-utxos")
    );

    let response = ErrorResponse::from_error(&err);
    assert_eq!(response.status, 400);
    assert_eq!(response.code, "error-user-has-existing-utxos");
    assert_eq!(response.message, "cannot delete user with existing UTXOs");

    // The user survived the rejected delete.
    assert!(engine.user_by_id("alice").await.is_ok());
}

#[tokio::test]
async fn delete_user_cascades_paymails() {
    let engine = engine_with_db().await;
    engine
        .create_user(new_user("alice", Some("alice@example.com")))
        .await
        .unwrap();

    engine.delete_user("alice").await.unwrap();

    let err = engine.user_by_id("alice").await.unwrap_err();
    assert!(err.is_of_subtype(&errors::NOT_FOUND));
}

#[tokio::test]
async fn delete_user_cascades_transactions() {
    let engine = engine_with_db().await;
    engine.create_user(new_user("alice", None)).await.unwrap();
    engine
        .record_transaction(engine::NewTransaction {
            id: "tx-1".to_string(),
            user_id: "alice".to_string(),
            status: engine::TransactionStatus::Mined,
            satoshis: 900,
        })
        .await
        .unwrap();

    engine.delete_user("alice").await.unwrap();

    let err = engine.transaction_by_id("tx-1").await.unwrap_err();
    assert!(err.is_of_subtype(&errors::NOT_FOUND));
}

#[tokio::test]
async fn delete_missing_user_maps_to_not_found() {
    let engine = engine_with_db().await;

    let err = engine.delete_user("ghost").await.unwrap_err();
    assert!(err.is_of_subtype(&errors::NOT_FOUND));
}

#[tokio::test]
async fn record_utxo_requires_the_user() {
    let engine = engine_with_db().await;

    let err = engine
        .record_utxo(NewUtxo {
            tx_id: "tx-1".to_string(),
            vout: 0,
            user_id: "ghost".to_string(),
            satoshis: 5000,
        })
        .await
        .unwrap_err();

    assert!(err.is_of_subtype(&errors::NOT_FOUND));
    assert_eq!(
        err.property(CODE).as_deref(),
        Some("error-user-not-found")
    );
}

#[tokio::test]
async fn user_utxos_lists_only_unspent() {
    let engine = engine_with_db().await;
    engine.create_user(new_user("alice", None)).await.unwrap();
    engine
        .record_utxo(NewUtxo {
            tx_id: "tx-1".to_string(),
            vout: 0,
            user_id: "alice".to_string(),
            satoshis: 5000,
        })
        .await
        .unwrap();
    engine
        .record_utxo(NewUtxo {
            tx_id: "tx-1".to_string(),
            vout: 1,
            user_id: "alice".to_string(),
            satoshis: 800,
        })
        .await
        .unwrap();

    let utxos = engine.user_utxos("alice").await.unwrap();
    assert_eq!(utxos.len(), 2);
    assert!(utxos.iter().all(|utxo| utxo.spending_tx_id.is_none()));
}

#[tokio::test]
async fn blank_id_is_a_missing_field() {
    let engine = engine_with_db().await;

    let err = engine.user_by_id("  ").await.unwrap_err();
    assert!(err.is_of_subtype(&errors::MISSING_FIELD));
    assert_eq!(err.message(), "missing required field: id");
    assert_eq!(ErrorResponse::from_error(&err).status, 400);
}

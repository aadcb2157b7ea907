use std::collections::HashSet;
use std::sync::Arc;

use payment_service::handlers::{CommandHandler, QueryHandler};
use payment_service::memory::InMemoryPaymentRepository;
use shared::{PaymentQuery, PaymentRequest};

fn handlers() -> (CommandHandler, QueryHandler, InMemoryPaymentRepository) {
    let repo = InMemoryPaymentRepository::new();
    (
        CommandHandler::new(Arc::new(repo.clone())),
        QueryHandler::new(Arc::new(repo.clone())),
        repo,
    )
}

#[tokio::test]
async fn recorded_payment_is_found_by_its_id() {
    let (commands, queries, _) = handlers();

    let r1 = commands
        .take_money(PaymentRequest::new(100.0, "pending"))
        .await
        .unwrap();
    let result = queries.find_payments(PaymentQuery::by_id(&r1.id)).await.unwrap();

    assert_eq!(result.count(), 1);
    assert_eq!(result.items(), &[r1]);
}

#[tokio::test]
async fn status_filter_selects_matching_records() {
    let (commands, queries, _) = handlers();
    let pending = commands
        .take_money(PaymentRequest::new(100.0, "pending"))
        .await
        .unwrap();
    commands
        .take_money(PaymentRequest::new(250.0, "completed"))
        .await
        .unwrap();

    let result = queries
        .find_payments(PaymentQuery::by_status("pending"))
        .await
        .unwrap();

    assert_eq!(result.count(), 1);
    assert_eq!(result.items(), &[pending]);
}

#[tokio::test]
async fn missing_id_yields_empty_result() {
    let (commands, queries, _) = handlers();
    commands
        .take_money(PaymentRequest::new(1.0, "pending"))
        .await
        .unwrap();

    let result = queries
        .find_payments(PaymentQuery::by_id("missing-id"))
        .await
        .unwrap();

    assert_eq!(result.count(), 0);
    assert!(result.items().is_empty());
}

#[tokio::test]
async fn id_and_status_combine_as_a_conjunction() {
    let (commands, queries, _) = handlers();
    let record = commands
        .take_money(PaymentRequest::new(5.0, "pending"))
        .await
        .unwrap();

    let cases = [
        (record.id.as_str(), "pending", 1),
        (record.id.as_str(), "completed", 0),
        ("missing-id", "pending", 0),
    ];
    for (id, status, expected) in cases {
        let result = queries
            .find_payments(PaymentQuery::by_id(id).with_status(status))
            .await
            .unwrap();
        assert_eq!(result.count(), expected, "id={id} status={status}");
        assert_eq!(result.count(), result.items().len());
    }
}

#[tokio::test]
async fn repeated_query_returns_same_set() {
    let (commands, queries, _) = handlers();
    for (amount, status) in [(1.0, "pending"), (2.0, "completed"), (3.0, "pending")] {
        commands
            .take_money(PaymentRequest::new(amount, status))
            .await
            .unwrap();
    }

    let ids = |items: &[shared::PaymentRecord]| -> HashSet<String> {
        items.iter().map(|r| r.id.clone()).collect()
    };

    let first = queries.find_payments(PaymentQuery::default()).await.unwrap();
    let second = queries.find_payments(PaymentQuery::default()).await.unwrap();

    assert_eq!(first.count(), 3);
    assert_eq!(first.count(), second.count());
    assert_eq!(ids(first.items()), ids(second.items()));
}

#[tokio::test]
async fn invalid_command_writes_nothing() {
    let (commands, _, repo) = handlers();

    assert!(commands
        .take_money(PaymentRequest::new(-1.0, "pending"))
        .await
        .is_err());
    assert!(commands
        .take_money(PaymentRequest::new(1.0, "  "))
        .await
        .is_err());

    assert!(repo.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_commands_get_distinct_ids() {
    let (commands, queries, _) = handlers();

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let commands = commands.clone();
            tokio::spawn(async move {
                commands
                    .take_money(PaymentRequest::new(i as f64, "pending"))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let record = task.await.unwrap().unwrap();
        ids.insert(record.id);
    }
    assert_eq!(ids.len(), 50);

    let all = queries.find_payments(PaymentQuery::default()).await.unwrap();
    assert_eq!(all.count(), 50);
}

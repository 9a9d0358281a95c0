//! End-to-end tests against a live hived daemon
//! Run with: cargo test --test e2e -- --ignored (requires hived on localhost:8081)

use tokio_util::sync::CancellationToken;

use hivec::{Context, Error, HttpTransport, Operation, OperationQueue, Orchestrator, RunEvent};

async fn collect(
    queue: OperationQueue,
    context: Context,
) -> (Vec<Result<String, Error>>, bool) {
    let orchestrator = Orchestrator::new(HttpTransport::new());
    let mut events = orchestrator.run(queue, context, CancellationToken::new());

    let mut results = Vec::new();
    let mut finished_ok = false;
    while let Some(event) = events.recv().await {
        match event {
            RunEvent::Result(outcome) => results.push(outcome),
            RunEvent::Finished { ok } => finished_ok = ok,
        }
    }

    (results, finished_ok)
}

#[tokio::test]
#[ignore] // Run manually: cargo test --test e2e -- --ignored
async fn test_list_hosts() {
    let mut queue = OperationQueue::new();
    queue.enqueue(Operation::ListHosts);

    let (results, ok) = collect(queue, Context::builder().build()).await;

    assert!(ok, "listing failed: {results:?}");
    assert_eq!(results.len(), 1);
    assert!(results[0].as_ref().unwrap().contains("score: "));
}

#[tokio::test]
#[ignore]
async fn test_container_lifecycle() {
    let context = Context::builder().container("hivec-e2e").build();

    let mut queue = OperationQueue::new();
    queue.enqueue(Operation::create());
    queue.enqueue(Operation::Start);
    queue.enqueue(Operation::Stop);
    queue.enqueue(Operation::Destroy);
    queue.set_images(vec!["ubuntu".to_string()]);

    let (results, ok) = collect(queue, context).await;

    assert!(ok, "lifecycle failed: {results:?}");
    assert_eq!(results.len(), 4);
    assert!(results[0]
        .as_ref()
        .unwrap()
        .starts_with("Created container hivec-e2e"));
}

#[tokio::test]
#[ignore]
async fn test_start_unknown_container_reports_missing() {
    let context = Context::builder()
        .container("hivec-e2e-ghost")
        .build();

    let mut queue = OperationQueue::new();
    queue.enqueue(Operation::Start);

    let (results, ok) = collect(queue, context).await;

    assert!(!ok);
    assert!(matches!(results[0], Err(Error::NoSuchContainer)));
}

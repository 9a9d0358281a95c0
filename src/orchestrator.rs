//! Queue execution and result streaming

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::{self, ResolvedRequest};
use crate::context::Context;
use crate::error::Result;
use crate::operation::{Operation, OperationQueue};
use crate::transport::Transport;

/// Streamed by [`Orchestrator::run`]: one `Result` per operation in
/// queue order, then exactly one `Finished`.
#[derive(Debug)]
pub enum RunEvent {
    Result(Result<String>),
    Finished { ok: bool },
}

/// Drives a queue against a transport, one operation at a time.
///
/// Operations run strictly sequentially; a later operation may depend
/// on the side effects of an earlier one (start after create), so
/// nothing is parallelized.
pub struct Orchestrator<T> {
    transport: Arc<T>,
}

impl<T: Transport + 'static> Orchestrator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Consume the queue in order, streaming one event per operation.
    ///
    /// A failed operation does not stop the ones behind it. Cancelling
    /// the token stops dequeuing and abandons an in-flight call. The
    /// stream always ends with `Finished`, whose flag is true only if
    /// every operation succeeded.
    pub fn run(
        &self,
        queue: OperationQueue,
        context: Context,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel(16);
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            let mut ok = true;

            for op in queue {
                if cancel.is_cancelled() {
                    tracing::info!("cancelled, dropping remaining operations");
                    break;
                }

                let outcome = tokio::select! {
                    outcome = execute(transport.as_ref(), &op, &context) => outcome,
                    _ = cancel.cancelled() => {
                        tracing::info!("cancelled mid-flight");
                        break;
                    }
                };

                ok &= outcome.is_ok();
                if tx.send(RunEvent::Result(outcome)).await.is_err() {
                    // Receiver gone, nobody is listening anymore.
                    return;
                }
            }

            let _ = tx.send(RunEvent::Finished { ok }).await;
        });

        rx
    }
}

/// Resolve, then either simulate or dispatch and decode.
async fn execute<T: Transport>(transport: &T, op: &Operation, context: &Context) -> Result<String> {
    let request = api::resolve(op, context)?;

    if context.dry_run {
        return Ok(dry_run_line(op, &request));
    }

    tracing::debug!(request = %request, "dispatching");
    let response = transport.send(&request).await?;
    tracing::debug!(
        status = response.status,
        bytes = response.body.len(),
        "response received"
    );

    api::decode(op, context, &response)
}

/// What a dry run prints: method and URL, plus the create parameters
/// when the operation carries them. The key is echoed as given (raw
/// key or file path), never as file contents.
fn dry_run_line(op: &Operation, request: &ResolvedRequest) -> String {
    let mut line = request.to_string();

    if let Operation::Create {
        images,
        key_path,
        raw_key,
    } = op
    {
        for image in images {
            line.push_str(&format!(" image={image}"));
        }

        if let Some(key) = raw_key.as_deref().filter(|k| !k.is_empty()) {
            line.push_str(&format!(" key={key}"));
        } else if let Some(path) = key_path.as_deref().filter(|p| !p.is_empty()) {
            line.push_str(&format!(" key={path}"));
        }
    }

    line
}

//! hivec client library for the hived container orchestration daemon
//!
//! Turns user intents (create, start, stop, destroy a container; list
//! containers, hosts or pools) into an ordered queue of HTTP calls
//! against the daemon, executes or simulates them, decodes the
//! per-operation JSON replies and streams a human-readable result for
//! each one.
//!
//! # Example
//!
//! ```no_run
//! use hivec::{Context, HttpTransport, Operation, OperationQueue, Orchestrator, RunEvent};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() {
//! let context = Context::builder().container("box1").build();
//!
//! let mut queue = OperationQueue::new();
//! queue.enqueue(Operation::create());
//! queue.enqueue(Operation::Start);
//! queue.set_images(vec!["ubuntu".to_string()]);
//!
//! let orchestrator = Orchestrator::new(HttpTransport::new());
//! let mut events = orchestrator.run(queue, context, CancellationToken::new());
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         RunEvent::Result(Ok(text)) => println!("{text}"),
//!         RunEvent::Result(Err(err)) => eprintln!("{err}"),
//!         RunEvent::Finished { .. } => {}
//!     }
//! }
//! # }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod operation;
pub mod orchestrator;
pub mod transport;

pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use operation::{Operation, OperationQueue};
pub use orchestrator::{Orchestrator, RunEvent};
pub use transport::{HttpTransport, RawResponse, Transport};

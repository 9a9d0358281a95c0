//! Queued operations and the queue that orders them

use serde::{Deserialize, Serialize};

/// One queued intent against the daemon.
///
/// An operation carries no URL; method and path are derived from the
/// [`Context`](crate::Context) at resolution time, which keeps the
/// variants serializable and testable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Create a container from one or more images.
    Create {
        images: Vec<String>,
        /// Path to a public ssh key file whose contents are sent along.
        key_path: Option<String>,
        /// Literal public ssh key. Wins over `key_path`.
        raw_key: Option<String>,
    },
    Start,
    Stop,
    Destroy,
    /// All hosts, or a single host when the context names one.
    ListContainers,
    ListHosts,
    ListPools,
}

impl Operation {
    /// A create with no parameters yet; they are attached later through
    /// the queue setters.
    pub fn create() -> Self {
        Operation::Create {
            images: Vec::new(),
            key_path: None,
            raw_key: None,
        }
    }
}

/// Ordered sequence of operations, consumed exactly once by the
/// orchestrator. No validation happens at enqueue time; conflicting or
/// missing parameters surface when the operation executes.
#[derive(Debug, Default)]
pub struct OperationQueue {
    ops: Vec<Operation>,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation; queue order is execution order.
    pub fn enqueue(&mut self, op: Operation) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Attach images to every create currently in the queue.
    ///
    /// Every create, not just the most recent one; a run normally
    /// enqueues at most a single create, so the distinction only shows
    /// up in contrived queues.
    pub fn set_images(&mut self, images: Vec<String>) {
        for op in &mut self.ops {
            if let Operation::Create { images: slot, .. } = op {
                *slot = images.clone();
            }
        }
    }

    /// Attach a key file path to every queued create.
    pub fn set_key_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        for op in &mut self.ops {
            if let Operation::Create { key_path, .. } = op {
                *key_path = Some(path.clone());
            }
        }
    }

    /// Attach a literal key to every queued create.
    pub fn set_raw_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        for op in &mut self.ops {
            if let Operation::Create { raw_key, .. } = op {
                *raw_key = Some(key.clone());
            }
        }
    }
}

impl IntoIterator for OperationQueue {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

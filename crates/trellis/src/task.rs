//! Deferred task queue: multi-producer, drained on the UI thread.

use std::sync::{Arc, Mutex};

use crate::{tree::Tree, WidgetId};

/// A closure queued for execution on the UI thread.
pub(crate) struct QueuedTask {
    /// If set, the task is dropped without running when the owner is no
    /// longer alive in the arena at drain time.
    pub owner: Option<WidgetId>,
    /// The work itself, run with exclusive tree access.
    pub work: Box<dyn FnOnce(&mut Tree) + Send>,
}

type Queue = Arc<Mutex<Vec<QueuedTask>>>;

/// Cloneable handle for enqueuing deferred work from any thread. Background
/// loaders hold one of these to post completion callbacks.
#[derive(Clone)]
pub struct TaskSender {
    queue: Queue,
}

impl TaskSender {
    /// Queue a closure to run on the next update pass.
    pub fn defer<F>(&self, work: F)
    where
        F: FnOnce(&mut Tree) + Send + 'static,
    {
        self.push(QueuedTask {
            owner: None,
            work: Box::new(work),
        });
    }

    /// Queue a closure tied to a widget's lifetime. If the widget has been
    /// destroyed by the time the queue is drained, the closure is dropped
    /// unrun.
    pub fn defer_owned<F>(&self, owner: WidgetId, work: F)
    where
        F: FnOnce(&mut Tree) + Send + 'static,
    {
        self.push(QueuedTask {
            owner: Some(owner),
            work: Box::new(work),
        });
    }

    fn push(&self, task: QueuedTask) {
        let mut q = match self.queue.lock() {
            Ok(q) => q,
            Err(poisoned) => poisoned.into_inner(),
        };
        q.push(task);
    }
}

/// The consumer side, owned by the tree.
pub(crate) struct TaskQueue {
    queue: Queue,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A producer handle sharing this queue.
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Swap the queue contents out under the lock. Tasks queued while the
    /// drained batch runs land in the next batch.
    pub fn drain(&self) -> Vec<QueuedTask> {
        let mut q = match self.queue.lock() {
            Ok(q) => q,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut *q)
    }
}

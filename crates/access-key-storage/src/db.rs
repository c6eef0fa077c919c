use futures::channel::{mpsc, oneshot};

use crate::types::{AccessKeyStorageError, RecordKey};

pub type Reply<T> = oneshot::Sender<Result<T, AccessKeyStorageError>>;

/// Requests served by the record store. Each carries its own typed reply.
#[derive(Debug)]
pub enum RecordOp {
    /// A missing record answers `Ok(None)`.
    Load {
        key: RecordKey,
        reply: Reply<Option<Vec<u8>>>,
    },

    /// Overwrite and flush in one step.
    Save {
        key: RecordKey,
        record: Vec<u8>,
        reply: Reply<()>,
    },

    /// Flush, close and stop serving.
    Close {
        reply: Reply<()>,
    },
}

pub struct RecordStoreConfig {
    path: String,
    in_memory: bool,

    op_receiver: mpsc::Receiver<RecordOp>,
}

impl RecordStoreConfig {
    pub fn new(
        path: String,
        in_memory: bool,
        op_receiver: mpsc::Receiver<RecordOp>,
    ) -> Self {
        Self { path, in_memory, op_receiver }
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pending_ops(&mut self) -> &mut mpsc::Receiver<RecordOp> {
        &mut self.op_receiver
    }
}

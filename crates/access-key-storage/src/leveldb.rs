use futures::{channel::{mpsc, oneshot}, StreamExt};
use rusty_leveldb::{DB, Options};

use crate::{RecordOp, RecordStoreConfig, Reply, AccessKeyStorageError};

pub fn default_storage_opt(
    path: String,
    in_memory: bool
) -> (
    RecordStoreConfig,
    mpsc::Sender<RecordOp>,
) {
    // ops are served one at a time, callers wait for their turn
    let (op_sender, op_receiver) = mpsc::channel(0);
    (
        RecordStoreConfig::new(path, in_memory, op_receiver),
        op_sender,
    )
}

fn reply<T>(reply: Reply<T>, status: Result<T, AccessKeyStorageError>) {
    if reply.send(status).is_err() {
        log::warn!("record store caller dropped before the reply was sent");
    }
}

fn save(db: &mut DB, key: &[u8], record: &[u8]) -> Result<(), AccessKeyStorageError> {
    db.put(key, record)
        .map_err(|_| AccessKeyStorageError::FailToWriteDB)?;
    db.flush()
        .map_err(|_| AccessKeyStorageError::FailToFlushDB)
}

fn close(db: &mut DB) -> Result<(), AccessKeyStorageError> {
    db.flush()
        .map_err(|_| AccessKeyStorageError::FailToFlushDB)?;
    db.close()
        .map_err(|_| AccessKeyStorageError::FailToCloseDB)
}

/// Open the DB and serve ops on a dedicated thread, since the DB handle
/// cannot leave the thread that opened it. Returns once the open result is
/// known. Serving ends on `Close` or once every sender is dropped.
pub fn run_db_server(
    mut config: RecordStoreConfig
) -> Result<(), AccessKeyStorageError> {
    let (open_sender, open_receiver) = oneshot::channel();

    std::thread::spawn(move || {
        let opt = match config.is_in_memory() {
            false => Options::default(),
            true => rusty_leveldb::in_memory()
        };

        let mut db = match DB::open(config.path(), opt) {
            Ok(db) => {
                let _ = open_sender.send(Ok(()));
                db
            },
            Err(e) => {
                log::error!("cannot open {}: {:?}", config.path(), e);
                let _ = open_sender.send(Err(AccessKeyStorageError::FailToOpenDB));
                return;
            },
        };

        async_std::task::block_on(async move {
            while let Some(op) = config.pending_ops().next().await {
                match op {
                    RecordOp::Load { key, reply: r } => reply(r, Ok(db.get(&key))),
                    RecordOp::Save { key, record, reply: r } => reply(r, save(&mut db, &key, &record)),
                    RecordOp::Close { reply: r } => {
                        reply(r, close(&mut db));
                        return;
                    },
                }
            }

            log::debug!("all record store senders dropped, closing");
            if let Err(e) = close(&mut db) {
                log::error!("{}", e);
            }
        });
    });

    futures::executor::block_on(open_receiver)
        .map_err(|_| AccessKeyStorageError::FailToOpenDB)?
}

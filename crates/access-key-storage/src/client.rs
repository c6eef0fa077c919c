use futures::{channel::{mpsc, oneshot}, SinkExt};

use crate::{RecordOp, Reply, AccessKeyStorageError};

/// Async handle on a running record store.
#[derive(Debug, Clone)]
pub struct StorageClient {
    op_sender: mpsc::Sender<RecordOp>,
}

impl StorageClient {
    pub fn new(op_sender: mpsc::Sender<RecordOp>) -> Self {
        Self { op_sender }
    }

    async fn request<T, F>(&mut self, op: F) -> Result<T, AccessKeyStorageError>
        where F: FnOnce(Reply<T>) -> RecordOp
    {
        let (reply, reply_receiver) = oneshot::channel();
        self.op_sender
            .send(op(reply))
            .await
            .map_err(|_| AccessKeyStorageError::ServerGone)?;

        reply_receiver
            .await
            .map_err(|_| AccessKeyStorageError::ServerGone)?
    }

    pub async fn load(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, AccessKeyStorageError> {
        let key = key.to_vec();
        self.request(|reply| RecordOp::Load { key, reply }).await
    }

    pub async fn save(&mut self, key: &[u8], record: Vec<u8>) -> Result<(), AccessKeyStorageError> {
        let key = key.to_vec();
        self.request(|reply| RecordOp::Save { key, record, reply }).await
    }

    pub async fn close(mut self) -> Result<(), AccessKeyStorageError> {
        self.request(|reply| RecordOp::Close { reply }).await
    }
}

#[cfg(all(test, feature = "leveldb-backend"))]
mod test {
    use super::StorageClient;
    use crate::{default_storage_opt, run_db_server, AccessKeyStorageError};

    #[async_std::test]
    async fn save_overwrites() {
        let (config, sender) = default_storage_opt("in_memory".to_string(), true);
        run_db_server(config).unwrap();
        let mut client = StorageClient::new(sender);

        assert_eq!(client.load(b"k").await, Ok(None));

        client.save(b"k", b"v1".to_vec()).await.unwrap();
        client.save(b"k", b"v2".to_vec()).await.unwrap();
        assert_eq!(client.load(b"k").await, Ok(Some(b"v2".to_vec())));

        client.close().await.unwrap();
    }

    #[async_std::test]
    async fn survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").to_string_lossy().to_string();

        {
            let (config, sender) = default_storage_opt(path.clone(), false);
            run_db_server(config).unwrap();
            let mut client = StorageClient::new(sender);
            client.save(b"config", b"{}".to_vec()).await.unwrap();
            client.close().await.unwrap();
        }

        {
            let (config, sender) = default_storage_opt(path, false);
            run_db_server(config).unwrap();
            let mut client = StorageClient::new(sender);
            assert_eq!(client.load(b"config").await, Ok(Some(b"{}".to_vec())));
            client.close().await.unwrap();
        }
    }

    #[async_std::test]
    async fn server_gone_after_close() {
        let (config, sender) = default_storage_opt("in_memory".to_string(), true);
        run_db_server(config).unwrap();
        let mut client = StorageClient::new(sender);
        client.clone().close().await.unwrap();

        assert_eq!(client.load(b"k").await, Err(AccessKeyStorageError::ServerGone));
    }
}

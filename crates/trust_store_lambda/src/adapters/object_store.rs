#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutReceipt {
    /// Present only when the bucket has versioning enabled.
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to write s3://{bucket}/{key}: {message}")]
pub struct StoreError {
    pub bucket: String,
    pub key: String,
    pub message: String,
}

/// Blocking object store capability. Writes overwrite any existing object.
pub trait ArtifactStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<PutReceipt, StoreError>;
}

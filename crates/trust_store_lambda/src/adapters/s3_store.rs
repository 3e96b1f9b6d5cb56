use aws_sdk_s3::primitives::ByteStream;

use crate::adapters::object_store::{ArtifactStore, PutReceipt, StoreError};

#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ArtifactStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ArtifactStore for S3ArtifactStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<PutReceipt, StoreError> {
        let target_bucket = bucket.to_string();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(target_bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|output| PutReceipt {
                        version_id: output.version_id().map(str::to_string),
                    })
            })
        })
        .map_err(|error| StoreError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: aws_sdk_s3::error::DisplayErrorContext(error).to_string(),
        })
    }
}

use std::sync::Arc;
use std::time::Instant;

use trust_store_core::artifact::{join_certificates, trust_store_uri};
use trust_store_core::contract::{
    LifecycleRequest, LifecycleResult, Operation, ResponseData, ValidatedRequest,
    CREATE_SUCCESS_MESSAGE, DATA_MESSAGE, DATA_OBJECT_VERSION, DATA_TRUST_STORE_URI,
    UPDATE_SUCCESS_MESSAGE,
};

use crate::adapters::object_store::ArtifactStore;

/// Create and Update both overwrite the object; Delete leaves it in place.
#[derive(Debug)]
pub struct LifecycleDispatcher<S> {
    store: Arc<S>,
}

impl<S> Clone for LifecycleDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ArtifactStore> LifecycleDispatcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn dispatch(&self, validated: &ValidatedRequest) -> LifecycleResult {
        let request = validated.request();
        match validated.operation() {
            Operation::Create => self.write_trust_store(request, CREATE_SUCCESS_MESSAGE),
            Operation::Update => self.write_trust_store(request, UPDATE_SUCCESS_MESSAGE),
            Operation::Delete => {
                tracing::info!(
                    component = "lifecycle_dispatcher",
                    event = "delete_acknowledged",
                    request_id = %request.request_id,
                    bucket = %request.bucket,
                    key = %request.key,
                );
                LifecycleResult::success(ResponseData::new())
            }
            Operation::Unknown => {
                tracing::warn!(
                    component = "lifecycle_dispatcher",
                    event = "unknown_operation",
                    request_id = %request.request_id,
                );
                LifecycleResult::failed()
            }
        }
    }

    fn write_trust_store(&self, request: &LifecycleRequest, message: &str) -> LifecycleResult {
        let started_at = Instant::now();
        let body = join_certificates(&request.payload_lines);

        match self
            .store
            .put_object(&request.bucket, &request.key, body.as_bytes())
        {
            Ok(receipt) => {
                tracing::info!(
                    component = "lifecycle_dispatcher",
                    event = "trust_store_written",
                    request_id = %request.request_id,
                    bucket = %request.bucket,
                    key = %request.key,
                    certificates = request.payload_lines.len(),
                    version_id = receipt.version_id.as_deref().unwrap_or(""),
                    duration_ms = started_at.elapsed().as_millis() as u64,
                );
                let mut data = ResponseData::new();
                data.insert(DATA_MESSAGE.to_string(), message.to_string());
                data.insert(
                    DATA_TRUST_STORE_URI.to_string(),
                    trust_store_uri(&request.bucket, &request.key),
                );
                data.insert(
                    DATA_OBJECT_VERSION.to_string(),
                    receipt.version_id.unwrap_or_default(),
                );
                LifecycleResult::success(data)
            }
            Err(error) => {
                tracing::error!(
                    component = "lifecycle_dispatcher",
                    event = "store_put_failed",
                    request_id = %request.request_id,
                    error = %error,
                    duration_ms = started_at.elapsed().as_millis() as u64,
                );
                LifecycleResult::failed_with_message(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use trust_store_core::contract::ResultStatus;

    use super::*;
    use crate::adapters::object_store::{PutReceipt, StoreError};

    struct RecordingStore {
        writes: Mutex<HashMap<String, Vec<u8>>>,
        version_id: Option<String>,
    }

    impl RecordingStore {
        fn versioned(version_id: &str) -> Self {
            Self {
                writes: Mutex::new(HashMap::new()),
                version_id: Some(version_id.to_string()),
            }
        }

        fn unversioned() -> Self {
            Self {
                writes: Mutex::new(HashMap::new()),
                version_id: None,
            }
        }

        fn body(&self, location: &str) -> Option<Vec<u8>> {
            self.writes
                .lock()
                .expect("poisoned mutex")
                .get(location)
                .cloned()
        }

        fn write_count(&self) -> usize {
            self.writes.lock().expect("poisoned mutex").len()
        }
    }

    impl ArtifactStore for RecordingStore {
        fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: &[u8],
        ) -> Result<PutReceipt, StoreError> {
            self.writes
                .lock()
                .expect("poisoned mutex")
                .insert(format!("{bucket}/{key}"), body.to_vec());
            Ok(PutReceipt {
                version_id: self.version_id.clone(),
            })
        }
    }

    struct DenyingStore;

    impl ArtifactStore for DenyingStore {
        fn put_object(
            &self,
            bucket: &str,
            key: &str,
            _body: &[u8],
        ) -> Result<PutReceipt, StoreError> {
            Err(StoreError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "AccessDenied".to_string(),
            })
        }
    }

    fn sample_request(operation: Operation) -> ValidatedRequest {
        LifecycleRequest {
            operation: Some(operation),
            bucket: "b".to_string(),
            key: "k".to_string(),
            payload_lines: vec!["CERT1".to_string(), "CERT2".to_string()],
            callback_url: "https://callback.example/presigned".to_string(),
            stack_id: "stack-1".to_string(),
            request_id: "req-1".to_string(),
            logical_resource_id: "TrustStore".to_string(),
            physical_resource_id: "log-stream-1".to_string(),
        }
        .validate()
        .expect("sample request should validate")
    }

    #[test]
    fn create_writes_joined_certificates_and_reports_version() {
        let store = Arc::new(RecordingStore::versioned("v1"));
        let dispatcher = LifecycleDispatcher::new(Arc::clone(&store));

        let result = dispatcher.dispatch(&sample_request(Operation::Create));

        assert_eq!(result.status, ResultStatus::Success);
        assert_eq!(store.body("b/k"), Some(b"CERT1\nCERT2".to_vec()));
        assert_eq!(
            result.data.get(DATA_MESSAGE).map(String::as_str),
            Some("Resource creation successful!")
        );
        assert_eq!(
            result.data.get(DATA_TRUST_STORE_URI).map(String::as_str),
            Some("s3://b/k")
        );
        assert_eq!(
            result.data.get(DATA_OBJECT_VERSION).map(String::as_str),
            Some("v1")
        );
    }

    #[test]
    fn update_overwrites_with_same_shape() {
        let store = Arc::new(RecordingStore::versioned("v2"));
        let dispatcher = LifecycleDispatcher::new(Arc::clone(&store));

        let created = dispatcher.dispatch(&sample_request(Operation::Create));
        let updated = dispatcher.dispatch(&sample_request(Operation::Update));

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.body("b/k"), Some(b"CERT1\nCERT2".to_vec()));
        assert_eq!(updated.status, ResultStatus::Success);
        assert_eq!(
            updated.data.get(DATA_MESSAGE).map(String::as_str),
            Some("Resource update successful!")
        );
        assert_eq!(
            created.data.get(DATA_TRUST_STORE_URI),
            updated.data.get(DATA_TRUST_STORE_URI)
        );
    }

    #[test]
    fn unversioned_bucket_reports_empty_version() {
        let store = Arc::new(RecordingStore::unversioned());
        let dispatcher = LifecycleDispatcher::new(store);

        let result = dispatcher.dispatch(&sample_request(Operation::Create));

        assert_eq!(
            result.data.get(DATA_OBJECT_VERSION).map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn delete_and_unknown_never_touch_store() {
        let store = Arc::new(RecordingStore::versioned("v1"));
        let dispatcher = LifecycleDispatcher::new(Arc::clone(&store));

        let deleted = dispatcher.dispatch(&sample_request(Operation::Delete));
        let unknown = dispatcher.dispatch(&sample_request(Operation::Unknown));

        assert_eq!(deleted, LifecycleResult::success(ResponseData::new()));
        assert_eq!(unknown, LifecycleResult::failed());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn store_failure_becomes_failed_result_with_message() {
        let dispatcher = LifecycleDispatcher::new(Arc::new(DenyingStore));

        let result = dispatcher.dispatch(&sample_request(Operation::Create));

        assert_eq!(result.status, ResultStatus::Failed);
        let message = result.message().expect("failure should carry a message");
        assert!(message.contains("s3://b/k"));
        assert!(message.contains("AccessDenied"));
        assert!(!result.data.contains_key(DATA_TRUST_STORE_URI));
    }
}

//! Counting test doubles for the external seams, plus a context builder.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::context::AppContext;
use crate::error::OpError;
use crate::events::EventSink;
use crate::storage::MediaStorage;
use crate::vendor::AvatarVendor;

pub struct MockVendor {
    pub delete_calls: AtomicUsize,
    pub notify_calls: AtomicUsize,
    fail_with: Option<String>,
}

impl MockVendor {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            delete_calls: AtomicUsize::new(0),
            notify_calls: AtomicUsize::new(0),
            fail_with: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            delete_calls: AtomicUsize::new(0),
            notify_calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
        })
    }

    fn outcome(&self) -> Result<(), OpError> {
        match &self.fail_with {
            Some(message) => Err(OpError::Vendor(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AvatarVendor for MockVendor {
    async fn delete_avatar_group(&self, _group_id: &str) -> Result<(), OpError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn notify_voice_deleted(
        &self,
        _voice_id: &str,
        _voice_name: Option<&str>,
        _uid: &str,
    ) -> Result<(), OpError> {
        self.notify_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }
}

/// In-memory bucket. Deleting an absent key succeeds, mirroring the S3
/// DeleteObject contract the production backend follows.
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    content_types: Mutex<Vec<String>>,
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            objects: Mutex::new(HashMap::new()),
            content_types: Mutex::new(Vec::new()),
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn last_content_type(&self) -> Option<String> {
        self.content_types.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MediaStorage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), OpError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        self.content_types
            .lock()
            .unwrap()
            .push(content_type.to_string());
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), OpError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://storage.test/media/{key}")
    }
}

/// Records every emitted event as a flat line so tests can assert what was
/// logged without parsing log output.
pub struct RecordingSink {
    entries: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn started(&self, op: &str, _fields: &[(&str, &str)]) {
        self.entries.lock().unwrap().push(format!("{op} started"));
    }

    fn succeeded(&self, op: &str, _fields: &[(&str, &str)]) {
        self.entries.lock().unwrap().push(format!("{op} succeeded"));
    }

    fn failed(&self, op: &str, stage: &str, error: &str, _fields: &[(&str, &str)]) {
        self.entries
            .lock()
            .unwrap()
            .push(format!("{op} failed at {stage}: {error}"));
    }
}

pub fn test_ctx(
    db: DatabaseConnection,
) -> (
    AppContext,
    Arc<MockVendor>,
    Arc<MemoryStorage>,
    Arc<RecordingSink>,
) {
    test_ctx_with_vendor(db, MockVendor::ok())
}

pub fn test_ctx_with_vendor(
    db: DatabaseConnection,
    vendor: Arc<MockVendor>,
) -> (
    AppContext,
    Arc<MockVendor>,
    Arc<MemoryStorage>,
    Arc<RecordingSink>,
) {
    let storage = MemoryStorage::new();
    let events = RecordingSink::new();
    let ctx = AppContext {
        db,
        vendor: vendor.clone(),
        storage: storage.clone(),
        events: events.clone(),
    };
    (ctx, vendor, storage, events)
}

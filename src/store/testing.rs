//! In-memory fakes for store unit tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use url::Url;

use crate::merge::DeepMerge;
use crate::storage::Storage;
use crate::store::StoreContext;
use crate::transport::{FetchResponse, ResponseBody, Transport, TransportError};

type Responder = dyn Fn(&Url) -> Result<FetchResponse, TransportError> + Send + Sync;

/// Transport answering from a closure, counting calls.
pub struct FakeTransport {
    respond: Box<Responder>,
    calls: AtomicUsize,
    delay: Option<Duration>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&Url) -> Result<FetchResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            delay: None,
            gate: None,
        }
    }

    /// Always answer `status` with a text body.
    pub fn text(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(FetchResponse::new(status, ResponseBody::Text(body.clone()))))
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold every fetch until a permit is added to `gate`.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(url)
    }
}

/// Storage kept in a map, optionally refusing writes.
#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: bool,
    reads: AtomicUsize,
}

impl MemoryStorage {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn put(&self, path: impl Into<PathBuf>, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), contents.to_string());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().unwrap().is_empty()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.put(path, contents);
        Ok(())
    }
}

pub fn context(
    transport: Arc<dyn Transport>,
    storage: Arc<dyn Storage>,
    local_root: Option<PathBuf>,
    debug: bool,
) -> Arc<StoreContext> {
    Arc::new(StoreContext {
        transport,
        storage,
        merger: Arc::new(DeepMerge),
        local_root,
        debug,
    })
}

// Emulates the collector without a network, with scripted outcomes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

use common::errors::UploadError;
use common::traits::{SessionPort, UploadPort};
use common::types::{Ack, Destination};

const MOCK_SUCCESS_STATUS: u16 = 200;

/// One request received by the `MockUploader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub batch_name: String,
    pub batch_bytes: Vec<u8>,
    pub destination: Destination,
}

impl UploadCall {
    pub fn body(&self) -> String {
        String::from_utf8_lossy(&self.batch_bytes).into_owned()
    }
}

/// Upload adapter answering from a queue of scripted outcomes. Once the queue
/// is empty every upload succeeds.
///
/// Uploads can be held in flight with `pause` until `resume` is called.
pub struct MockUploader {
    outcomes: Mutex<VecDeque<Result<Ack, UploadError>>>,
    calls: Mutex<Vec<UploadCall>>,
    paused: watch::Sender<bool>,
    in_flight: AtomicUsize,
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUploader {
    pub fn new() -> Self {
        let (paused, _) = watch::channel(false);
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            paused,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Queues the outcome of a future upload.
    pub fn push_outcome(&self, outcome: Result<Ack, UploadError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    pub fn fail_next(&self, error: UploadError) {
        self.push_outcome(Err(error));
    }

    /// Holds every upload (current and future) until `resume` is called.
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    /// Uploads received so far, in arrival order.
    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn calls_for(&self, batch_name: &str) -> Vec<UploadCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.batch_name == batch_name)
            .collect()
    }

    /// Uploads currently held by `pause`.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    async fn wait_until_resumed(&self) {
        let mut paused = self.paused.subscribe();
        while *paused.borrow_and_update() {
            if paused.changed().await.is_err() {
                break;
            }
        }
    }
}

#[async_trait]
impl UploadPort for MockUploader {
    async fn upload(
        &self,
        batch_bytes: Vec<u8>,
        batch_name: &str,
        destination: &Destination,
    ) -> Result<Ack, UploadError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(UploadCall {
                batch_name: batch_name.to_string(),
                batch_bytes,
                destination: destination.clone(),
            });
        }

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.wait_until_resumed().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or(Ok(Ack {
                status: MOCK_SUCCESS_STATUS,
            }))
    }
}

/// Session collaborator counting announcements.
#[derive(Debug, Default)]
pub struct MockSessionNotifier {
    started: AtomicUsize,
    finished: AtomicUsize,
    fail: bool,
}

impl MockSessionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose announcements are always rejected by the server.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<Ack, UploadError> {
        if self.fail {
            Err(UploadError::ServerRejected { status_code: 500 })
        } else {
            Ok(Ack {
                status: MOCK_SUCCESS_STATUS,
            })
        }
    }
}

#[async_trait]
impl SessionPort for MockSessionNotifier {
    async fn session_started(&self) -> Result<Ack, UploadError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn session_finished(&self) -> Result<Ack, UploadError> {
        self.finished.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }
}

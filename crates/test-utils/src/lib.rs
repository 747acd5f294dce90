use async_trait::async_trait;
use contentgen::{GenerateError, GenerationBackend, Notifier, RequestPayload, ResultPayload};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Semaphore;

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// --- Mock Generation Backend ---

/// A scripted response for the mock backend.
#[derive(Clone, Debug)]
pub enum MockReply {
    Json(serde_json::Value),
    Status(u16),
    MalformedBody,
    /// The backend panics mid-request.
    Panic,
}

/// A backend that replays scripted replies and records every payload it sees.
///
/// When built with [`MockBackend::gated`], each call waits for a permit from
/// [`MockBackend::release`] before replying, which lets tests observe the
/// handler while a request is in flight.
#[derive(Clone, Debug)]
pub struct MockBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<RequestPayload>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockBackend {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn gated(replies: Vec<MockReply>) -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new(replies)
        }
    }

    /// Lets one waiting call through.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RequestPayload> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, payload: &RequestPayload) -> Result<ResultPayload, GenerateError> {
        self.calls.lock().unwrap().push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Json(value)) => Ok(ResultPayload::new(value)),
            Some(MockReply::Status(status)) => Err(GenerateError::Status {
                status,
                body: String::new(),
            }),
            Some(MockReply::MalformedBody) => {
                let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
                Err(GenerateError::Deserialization(err))
            }
            Some(MockReply::Panic) => panic!("MockBackend: scripted panic"),
            None => Err(GenerateError::Status {
                status: 500,
                body: "MockBackend: no reply programmed".to_string(),
            }),
        }
    }
}

// --- Recording Notifier ---

/// A notifier that keeps every alert for later assertion.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

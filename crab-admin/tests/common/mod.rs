// crab-admin/tests/common/mod.rs
// Scripted in-memory HttpClient

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crab_admin::{ClientError, ClientResult, HttpClient};
use serde_json::{Value, json};
use tokio::sync::oneshot;

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct Reply {
    result: ClientResult<Value>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Replies are queued per path and handed out in order.
#[derive(Default)]
pub struct MockHttp {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockHttp {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, result: ClientResult<Value>) {
        self.push(path, Reply { result, gate: None });
    }

    /// Queue a reply that is held back until the returned sender fires
    pub fn reply_gated(&self, path: &str, result: ClientResult<Value>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(
            path,
            Reply {
                result,
                gate: Some(rx),
            },
        );
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|q| q.pop_front());
        let Some(reply) = reply else {
            return Err(ClientError::Network(format!("no reply scripted for {path}")));
        };

        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.result
    }
}

/// `{ data, total, page }` body with `count` entries tagged by page
pub fn log_page(page: u32, count: usize, total: u64) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|i| json!({ "id": format!("p{page}-{i}"), "action": "login", "page": page }))
        .collect();
    json!({ "data": data, "total": total, "page": page })
}

pub fn server_error(message: &str) -> ClientError {
    ClientError::Http {
        status: 500,
        message: message.to_string(),
    }
}

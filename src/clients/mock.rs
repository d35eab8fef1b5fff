/// Recording stand-in for the NASA host used by service and handler tests.
use super::UpstreamApi;
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Default)]
pub struct MockUpstream {
    replies: HashMap<String, Reply>,
    fallback_status: Option<u16>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(path.to_string(), Reply::Json(body));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.replies.insert(path.to_string(), Reply::Status(status));
        self
    }

    /// Answer every unregistered path with `status`.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.fallback_status = Some(status);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn called_paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn last_query(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, q)| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UpstreamApi for MockUpstream {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.calls.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        let reply = self
            .replies
            .get(path)
            .cloned()
            .or(self.fallback_status.map(Reply::Status));

        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(ApiError::UpstreamStatus {
                status,
                path: path.to_string(),
            }),
            None => Err(ApiError::UpstreamStatus {
                status: 404,
                path: path.to_string(),
            }),
        }
    }
}

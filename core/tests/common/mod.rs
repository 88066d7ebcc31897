use async_trait::async_trait;
use momentum_core::{AdminError, ApiRequest, ApiResponse, Transport};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory stand-in for the persistence service.
///
/// Every request is recorded. Paths without a scripted answer get `200 []`.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: RefCell<HashMap<String, Result<ApiResponse, AdminError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.answers
            .borrow_mut()
            .insert(path.to_string(), Ok(ApiResponse::new(status, body)));
    }

    pub fn refuse(&self, path: &str) {
        self.answers
            .borrow_mut()
            .insert(path.to_string(), Err(AdminError::Transport("connection refused".into())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AdminError> {
        let answer = self
            .answers
            .borrow()
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "[]")));
        self.requests.borrow_mut().push(request);
        answer
    }
}

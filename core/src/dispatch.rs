//! CRUD dispatch against `/admin/{operation}/{resource}`
//!
//! The dispatcher only sends one request and classifies the answer. Follow-up
//! refreshes belong to the orchestrator.

use serde_json::{Map, Value};

use crate::coerce::Payload;
use crate::error::AdminError;
use crate::resource::{Operation, Resource};
use crate::row::Row;
use crate::transport::{ApiRequest, Transport};

/// Successful outcome of a dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// Records returned by a view
    Rows(Vec<Row>),
    /// A write was accepted with this status
    Applied { status: u16 },
}

/// Build the request for `(resource, operation)` without sending it.
///
/// View is a bodiless GET, empty a bodiless POST, and every other operation
/// a POST carrying the payload.
pub fn request_for(resource: Resource, operation: Operation, payload: Option<&Payload>) -> ApiRequest {
    let path = format!("/admin/{}/{}", operation, resource);
    match operation {
        Operation::View => ApiRequest::get(path),
        Operation::Empty => ApiRequest::post(path, None),
        Operation::Add | Operation::Update | Operation::Delete => {
            let body = payload
                .map(|p| p.clone().into_value())
                .unwrap_or_else(|| Value::Object(Map::new()));
            ApiRequest::post(path, Some(body))
        }
    }
}

pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn dispatch(
        &self,
        resource: Resource,
        operation: Operation,
        payload: Option<&Payload>,
    ) -> Result<Dispatched, AdminError> {
        let request = request_for(resource, operation, payload);
        log::debug!("{} {}", request.method, request.path);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("Error performing {} on {}: {}", operation, resource, e);
            e
        })?;

        if !response.is_success() {
            log::error!("Failed to {} {}: status {}", operation, resource, response.status);
            return Err(AdminError::Server {
                resource,
                operation,
                status: response.status,
            });
        }

        match operation {
            Operation::View => {
                let rows = Row::decode_all(resource, &response.body)?;
                log::debug!("Fetched {} {} records", rows.len(), resource);
                Ok(Dispatched::Rows(rows))
            }
            _ => {
                log::info!("{} operation on {} table was successful", operation, resource);
                Ok(Dispatched::Applied {
                    status: response.status,
                })
            }
        }
    }

    /// Fetch the current contents of `resource`
    pub async fn view(&self, resource: Resource) -> Result<Vec<Row>, AdminError> {
        match self.dispatch(resource, Operation::View, None).await? {
            Dispatched::Rows(rows) => Ok(rows),
            Dispatched::Applied { .. } => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_paths_and_methods() {
        for resource in Resource::ALL {
            let view = request_for(resource, Operation::View, None);
            assert_eq!(view.method, HttpMethod::Get);
            assert_eq!(view.path, format!("/admin/view/{}", resource.as_str()));
            assert!(view.body.is_none());

            let empty = request_for(resource, Operation::Empty, None);
            assert_eq!(empty.method, HttpMethod::Post);
            assert_eq!(empty.path, format!("/admin/empty/{}", resource.as_str()));
            assert!(empty.body.is_none());
        }
    }

    #[test]
    fn test_write_carries_payload() {
        let payload: Payload = serde_json::from_value(json!({"id": 4})).unwrap();
        let request = request_for(Resource::Exercises, Operation::Delete, Some(&payload));
        assert_eq!(request.path, "/admin/delete/exercises");
        assert_eq!(request.body, Some(json!({"id": 4})));
    }
}

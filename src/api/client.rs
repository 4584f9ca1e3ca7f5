//! List API client
//!
//! `ListSource` is the seam between the pagination driver and whatever
//! serves pages; `ConsoleApi` serves them from the console's HTTP API.

use super::types::{api_error, parse_list_response, ListPage, ListRequest};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::resource::Resource;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// A paged list endpoint
#[async_trait]
pub trait ListSource<T: Send>: Send + Sync {
    /// Fetch one page
    async fn list(&self, request: &ListRequest) -> Result<ListPage<T>>;
}

/// List client for one console resource
pub struct ConsoleApi<T = JsonValue> {
    http: Arc<HttpClient>,
    resource: Resource,
    _item: PhantomData<fn() -> T>,
}

impl<T> ConsoleApi<T> {
    /// Create a client for `resource`
    pub fn new(http: Arc<HttpClient>, resource: Resource) -> Self {
        Self {
            http,
            resource,
            _item: PhantomData,
        }
    }

    /// Resource served by this client
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

impl<T> Clone for ConsoleApi<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.http), self.resource)
    }
}

impl<T> std::fmt::Debug for ConsoleApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleApi")
            .field("resource", &self.resource)
            .field("http", &self.http)
            .finish()
    }
}

#[async_trait]
impl<T> ListSource<T> for ConsoleApi<T>
where
    T: DeserializeOwned + Send,
{
    async fn list(&self, request: &ListRequest) -> Result<ListPage<T>> {
        debug!(
            resource = %self.resource,
            max_results = request.max_results,
            has_token = request.next_token.is_some(),
            "Describing {}",
            self.resource.items_key()
        );

        let body: JsonValue = self
            .http
            .post_json(self.resource.endpoint(), request)
            .await
            .map_err(promote_api_error)?;

        parse_list_response(body, self.resource.items_key())
    }
}

/// Prefer the console's `Error.message` over the raw status body
fn promote_api_error(err: Error) -> Error {
    match err {
        Error::HttpStatus { status, body } => serde_json::from_str::<JsonValue>(&body)
            .ok()
            .and_then(|json| api_error(&json))
            .unwrap_or(Error::HttpStatus { status, body }),
        other => other,
    }
}

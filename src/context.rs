use axum::{
    extract::FromRequestParts,
    http::{Extensions, HeaderMap, Method, Uri, request::Parts},
};
use std::convert::Infallible;
use uuid::Uuid;

/// Header carrying a caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The per-request context handed to repositories
///
/// Controllers only forward it. Repositories may read request metadata or
/// anything a middleware layer stored in the extensions (a database pool,
/// the authenticated tenant, ...).
///
/// # Example
/// ```
/// use meshestra_crud::RequestContext;
/// use axum::Json;
///
/// async fn whoami(ctx: RequestContext) -> Json<String> {
///     Json(ctx.request_id().to_string())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    extensions: Extensions,
}

impl RequestContext {
    /// Build a context outside of an HTTP request (jobs, tests)
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method,
            uri,
            headers: HeaderMap::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            request_id,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            extensions: parts.extensions.clone(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions.get::<T>()
    }

    /// Attach a value for repositories to pick up
    pub fn with_extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Method::GET, Uri::from_static("/"))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

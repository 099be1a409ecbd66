use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard API response wrapper
///
/// Every generic controller route answers with this envelope.
///
/// # Example
/// ```
/// use meshestra_crud::common::{ApiResponse, StatusCode};
///
/// let found = ApiResponse::success(vec![1, 2, 3]);
/// assert!(found.success);
///
/// // Returns a 404 response with code: "NotFound"
/// let missing: ApiResponse<()> = ApiResponse::error(StatusCode::NotFound, "Resource missing");
/// assert_eq!(missing.error.unwrap().code, "NotFound");
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    pub success: bool,

    #[serde(skip)]
    pub http_status: HttpStatusCode,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response with data
    ///
    /// Defaults to HTTP 200 OK.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            success: true,
            http_status: HttpStatusCode::OK,
        }
    }

    /// Create a successful response for newly stored data (HTTP 201)
    pub fn created(data: T) -> Self {
        Self {
            http_status: HttpStatusCode::CREATED,
            ..Self::success(data)
        }
    }

    /// Create an error response
    ///
    /// The error `code` is the `StatusCode` variant name.
    pub fn error(status: crate::common::StatusCode, message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            data: None,
            error: Some(ApiError {
                code: status.to_string(),
                message: message.into(),
            }),
            success: false,
            http_status: status.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

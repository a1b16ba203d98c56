use axum::{
    extract::{OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use log::error;
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};
use tracking::RequestError;

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

/// A list of items, serialized as `{ "data": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VecResponse<T> {
    pub data: Vec<T>,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }
}

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn schema_no_example<T: JsonSchema + Serialize>(
    Query(_params): Query<SchemaParams>,
) -> impl IntoResponse {
    Json(schema_for!(T))
}

pub(crate) async fn route_not_implemented(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    not_implemented_response(req.method(), original_uri.path())
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    not_found_response(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_information: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
            detailed_information: None,
        }
    }

    pub fn not_implemented(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("i dunno what happened here :/");
        self.with_message(message)
    }

    pub fn with_detailed_information(mut self, message: impl Into<String>) -> Self {
        self.detailed_information = Some(message.into());
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NotFound => Self::new(StatusCode::NOT_FOUND)
                .with_message("The requested item does not exist."),
            RequestError::IdMissing => Self::new(StatusCode::BAD_REQUEST)
                .with_message("The item has no id."),
            RequestError::Rejected(why) => Self::new(StatusCode::BAD_REQUEST)
                .with_default_message()
                .with_detailed_information(why.to_string()),
            RequestError::Input(why) => Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_message("The stored routes and stops do not fit the report settings.")
                .with_detailed_information(why.to_string()),
            RequestError::Other(other) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_message(format!("{}", other))
            }
        }
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            error!(
                "{} {}: {}",
                self.http_method.as_deref().unwrap_or("-"),
                self.requested_uri.as_deref().unwrap_or("-"),
                self.detailed_information
                    .as_deref()
                    .or(self.message.as_deref())
                    .unwrap_or("unknown error")
            );
        }
        (self.status_code, Json(self)).into_response()
    }
}

pub(crate) fn not_implemented_response(
    method: &Method,
    uri: &str,
) -> impl IntoResponse {
    RouteErrorResponse::not_implemented(method, uri)
}

pub(crate) fn not_found_response(method: &Method, uri: &str) -> impl IntoResponse {
    RouteErrorResponse::not_found(method, uri)
}

#[cfg(test)]
mod tests {
    use eta::InputError;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_items_are_not_found() {
        let response = RouteErrorResponse::from(RequestError::NotFound);
        assert_eq!(StatusCode::NOT_FOUND, response.status_code);
    }

    #[test]
    fn input_errors_are_server_errors_with_details() {
        let response = RouteErrorResponse::from(RequestError::Input(
            InputError::IndexOutOfRange { index: 9, len: 4 },
        ));
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status_code);
        assert_eq!(
            Some(InputError::IndexOutOfRange { index: 9, len: 4 }.to_string()),
            response.detailed_information
        );
    }

    #[test]
    fn rejected_requests_are_bad_requests() {
        let response =
            RouteErrorResponse::from(RequestError::Rejected(InputError::EmptyRoute));
        assert_eq!(StatusCode::BAD_REQUEST, response.status_code);
        assert_eq!(
            Some(InputError::EmptyRoute.to_string()),
            response.detailed_information
        );
    }

    #[test]
    fn error_body_skips_empty_fields() {
        let response = RouteErrorResponse::not_found(&Method::DELETE, "/api/v1/stops/3");
        assert_eq!(
            json!({
                "httpMethod": "DELETE",
                "requestedUri": "/api/v1/stops/3",
                "message": "Not Found"
            }),
            serde_json::to_value(&response).unwrap()
        );
    }
}

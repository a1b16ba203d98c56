use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{get, on, put},
    Extension, Json, Router,
};
use model::{route::Route, WithId};
use serde::Deserialize;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult,
        VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/routes{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Route>))
        .route("/:id", get(get_route).delete(delete_route))
        .route("/:id/enabled", put(set_enabled))
        .route("/", get(get_routes).post(create_route))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_routes(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Route>>>> {
    tracking_client
        .get_routes()
        .await
        .map(|routes| {
            routes
                .into_iter()
                .map(|route| route_hateoas(route, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_route(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i64>,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Route>> {
    tracking_client
        .get_route(Id::new(id))
        .await
        .map(|route| route_hateoas(route, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn create_route(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(route): Json<Route>,
) -> HateoasResult<WithId<Route>> {
    tracking_client
        .create_route(route)
        .await
        .map(|route| route_hateoas(route, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn delete_route(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i64>,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
) -> RouteResult<StatusCode> {
    tracking_client
        .delete_route(Id::new(id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::DELETE)
                .with_uri(original_uri.path())
        })
}

#[derive(Deserialize)]
struct EnabledBody {
    enabled: bool,
}

async fn set_enabled(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i64>,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(body): Json<EnabledBody>,
) -> HateoasResult<WithId<Route>> {
    tracking_client
        .set_route_enabled(Id::new(id), body.enabled)
        .await
        .map(|route| route_hateoas(route, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::PUT)
                .with_uri(original_uri.path())
        })
}

fn route_hateoas(
    route: WithId<Route>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<Route>> {
    let id = route.id.raw();
    hateoas::Response::builder(route, base_url)
        .link("self", resource!("/{}", id))
        .link("enabled", resource!("/{}/enabled", id))
        .link("eta", super::eta::resource!(""))
        .build()
}

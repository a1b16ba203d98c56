use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, on},
    Extension, Json, Router,
};
use model::{stop::Stop, WithId};
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
        crate::api::v1::resource!("/stops{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Stop>))
        .route("/:id", delete(delete_stop))
        .route("/", get(get_stops).post(create_stop))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_stops(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Stop>>>> {
    tracking_client
        .get_stops()
        .await
        .map(|stops| {
            stops
                .into_iter()
                .map(|stop| stop_hateoas(stop, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn create_stop(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(stop): Json<Stop>,
) -> HateoasResult<WithId<Stop>> {
    tracking_client
        .create_stop(stop)
        .await
        .map(|stop| stop_hateoas(stop, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn delete_stop(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i64>,
    State(WebState {
        tracking_client, ..
    }): State<WebState>,
) -> RouteResult<StatusCode> {
    tracking_client
        .delete_stop(Id::new(id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::DELETE)
                .with_uri(original_uri.path())
        })
}

fn stop_hateoas(stop: WithId<Stop>, base_url: Arc<BaseUrl>) -> hateoas::Response<WithId<Stop>> {
    let id = stop.id.raw();
    hateoas::Response::builder(stop, base_url)
        .link("self", resource!("/{}", id))
        .build()
}

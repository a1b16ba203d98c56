use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use eta::{InputError, Report, ReportParameters};
use log::debug;
use model::coordinate::Coordinate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracking::{position::FixedPosition, RequestError};

use crate::{
    common::{
        route_not_found, schema_no_example, HateoasResult, RouteErrorResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    EtaState, WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/eta{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<EtaDto>))
        .route("/", get(get_eta))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

const DISTANCE_UNIT: &str = "km";

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct EtaDto {
    unit: String,
    vehicle: Coordinate,
    distances: Report,
}

/// Per-request overrides of the configured route selectors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EtaQuery {
    reporting_route: Option<usize>,
    snapping_route: Option<usize>,
}

impl EtaQuery {
    fn apply(&self, configured: &ReportParameters) -> ReportParameters {
        ReportParameters {
            reporting_route: self.reporting_route.unwrap_or(configured.reporting_route),
            snapping_route: self.snapping_route.unwrap_or(configured.snapping_route),
            waypoints: configured.waypoints.clone(),
        }
    }

    /// Turns an out-of-range selector into a rejected request when the
    /// selector came from the query string. The reporting route is selected
    /// first, so an index equal to it is blamed on that selector.
    fn attribute(&self, applied: &ReportParameters, why: RequestError) -> RequestError {
        match why {
            RequestError::Input(InputError::RouteSelectorOutOfRange { index, len }) => {
                let from_query = if index == applied.reporting_route {
                    self.reporting_route.is_some()
                } else {
                    self.snapping_route.is_some()
                };
                let why = InputError::RouteSelectorOutOfRange { index, len };
                if from_query {
                    RequestError::Rejected(why)
                } else {
                    RequestError::Input(why)
                }
            }
            other => other,
        }
    }
}

async fn get_eta(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        tracking_client,
        eta: EtaState {
            parameters,
            position,
        },
    }): State<WebState>,
    Query(query): Query<EtaQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<EtaDto> {
    let error = |why: RequestError| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    };

    let parameters = query.apply(&parameters);
    // one sample per request, so the reported position matches the distances
    let vehicle = position.current_position().await.map_err(error)?;
    debug!("eta request with vehicle at {:?}", vehicle);

    let distances = tracking_client
        .eta_report(&parameters, &FixedPosition(vehicle))
        .await
        .map_err(|why| error(query.attribute(&parameters, why)))?;

    let dto = EtaDto {
        unit: DISTANCE_UNIT.to_owned(),
        vehicle,
        distances,
    };
    Ok(hateoas::Response::builder(dto, base_url)
        .link("self", resource!(""))
        .link("routes", super::routes::resource!(""))
        .link("stops", super::stops::resource!(""))
        .debug_info("parameters", &parameters)
        .build()
        .json())
}

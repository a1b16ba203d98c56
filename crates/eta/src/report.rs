use indexmap::IndexMap;
use log::{debug, trace};
use model::{coordinate::Coordinate, route::Route, stop::Stop};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{nearest_index, route_length, segment_distance, InputError};

/// A fixed stretch of the reporting route, named after the landmarks at its
/// ends. The indices refer to vertices of the route as it is currently
/// digitized and have to be updated whenever the route is captured again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Waypoint {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl Waypoint {
    pub fn new<S: Into<String>>(label: S, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// Selects what a report is computed on.
///
/// The vehicle is snapped onto the reporting route while stops are snapped onto
/// the snapping route. Both are positions in the route list handed to
/// [`build_report`] and may differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportParameters {
    pub reporting_route: usize,
    pub snapping_route: usize,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// Distances in kilometers by label, in the order they were computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Report(IndexMap<String, f64>);

impl Report {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A later entry replaces an earlier one with the same label.
    fn insert(&mut self, label: String, distance: f64) {
        self.0.insert(label, distance);
    }
}

/// Computes the distance from the vehicle to every stop, the length of every
/// configured waypoint and the total length of every route.
///
/// Fails without a partial result if a route selector is out of range, a route
/// has no points or a snapped stop does not exist on the reporting route.
pub fn build_report(
    routes: &[Route],
    stops: &[Stop],
    vehicle_position: Coordinate,
    parameters: &ReportParameters,
) -> Result<Report, InputError> {
    let reporting = select_route(routes, parameters.reporting_route)?;
    let snapping = select_route(routes, parameters.snapping_route)?;

    let stop_indices = stops
        .iter()
        .map(|stop| {
            nearest_index(&snapping.points, stop.coordinate).map(|index| (stop, index))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vehicle_index = nearest_index(&reporting.points, vehicle_position)?;
    debug!(
        "vehicle at {:?} snapped to vertex {} of route '{}'",
        vehicle_position, vehicle_index, reporting.name
    );

    let mut report = Report::default();

    for (stop, stop_index) in stop_indices {
        trace!("stop '{}' snapped to vertex {}", stop.name, stop_index);
        let distance = segment_distance(&reporting.points, vehicle_index, stop_index)?;
        report.insert(stop.name.clone(), distance);
    }

    for waypoint in parameters.waypoints.iter() {
        let distance =
            segment_distance(&reporting.points, waypoint.start, waypoint.end)?;
        report.insert(waypoint.label.clone(), distance);
    }

    for route in routes {
        report.insert(route.total_distance_label(), route_length(&route.points)?);
    }

    Ok(report)
}

fn select_route(routes: &[Route], index: usize) -> Result<&Route, InputError> {
    let route = routes
        .get(index)
        .ok_or(InputError::RouteSelectorOutOfRange {
            index,
            len: routes.len(),
        })?;
    if route.points.is_empty() {
        return Err(InputError::EmptyRoute);
    }
    Ok(route)
}

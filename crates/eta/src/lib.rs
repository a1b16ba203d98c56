//! Distance calculations along shuttle routes.
//!
//! Positions are snapped onto the vertices of a route, distances are summed
//! vertex by vertex and a query that runs backwards along the route is
//! answered by continuing past the last vertex at the first one.

pub mod accumulator;
pub mod error;
pub mod locator;
pub mod report;

pub use accumulator::{route_length, segment_distance};
pub use error::InputError;
pub use locator::nearest_index;
pub use report::{build_report, Report, ReportParameters, Waypoint};

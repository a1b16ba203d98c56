use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{coordinate::Coordinate, ExampleData};

/// A shuttle route. `points` is the digitized path in driving order and is the
/// only part of a route the distance calculations look at.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    pub description: Option<String>,
    pub points: Vec<Coordinate>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub color: Option<String>,
    pub width: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

fn enabled_by_default() -> bool {
    true
}

impl Route {
    pub fn new<S: Into<String>>(name: S, points: Vec<Coordinate>) -> Self {
        Self {
            name: name.into(),
            description: None,
            points,
            enabled: true,
            color: None,
            width: None,
            start_time: None,
            end_time: None,
            created: None,
            updated: None,
        }
    }

    /// Label under which the length of this route is reported.
    pub fn total_distance_label(&self) -> String {
        format!("{}'s total distance", self.name)
    }
}

impl HasId for Route {
    type IdType = i64;
}

impl ExampleData for Route {
    fn example_data() -> Self {
        Route {
            description: Some("Loop through west campus".to_owned()),
            color: Some("#96C03A".to_owned()),
            width: Some(4),
            start_time: Some("07:00".to_owned()),
            end_time: Some("23:45".to_owned()),
            ..Route::new(
                "West Campus",
                vec![
                    Coordinate::new(42.73029, -73.67655),
                    Coordinate::new(42.73088, -73.68014),
                    Coordinate::new(42.73185, -73.68707),
                ],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_distance_label_uses_route_name() {
        let route = Route::new("East Campus", vec![]);
        assert_eq!("East Campus's total distance", route.total_distance_label());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let route: Route = serde_json::from_str(
            r#"{"name": "West", "points": [{"latitude": 1.0, "longitude": 2.0}]}"#,
        )
        .unwrap();
        assert_eq!("West", route.name);
        assert_eq!(vec![Coordinate::new(1.0, 2.0)], route.points);
        assert!(route.enabled);
        assert!(route.created.is_none());
    }
}

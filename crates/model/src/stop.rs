use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{coordinate::Coordinate, ExampleData};

/// A shuttle stop. Stops are not tied to a route; their position along a route
/// is derived whenever it is needed.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new<S: Into<String>>(name: S, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            description: None,
            coordinate,
        }
    }
}

impl HasId for Stop {
    type IdType = i64;
}

impl ExampleData for Stop {
    fn example_data() -> Self {
        Stop {
            description: Some("In front of the student union".to_owned()),
            ..Stop::new("Student Union", Coordinate::new(42.73029, -73.67655))
        }
    }
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ExampleData;

/// A shuttle, keyed by the id reported by its tracking hardware.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl HasId for Vehicle {
    type IdType = String;
}

impl ExampleData for Vehicle {
    fn example_data() -> Self {
        Vehicle {
            name: "Shuttle 07".to_owned(),
            created: None,
            updated: None,
        }
    }
}

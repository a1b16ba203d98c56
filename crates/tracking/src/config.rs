use std::{
    env, error, fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use eta::{ReportParameters, Waypoint};
use log::debug;
use model::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

use crate::position::{FixedPosition, SimulatedPosition, VehiclePositionSource};

pub const CONFIG_PATH_VAR: &str = "ETA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "conf.json";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} is not set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value '{}'", key, value)
            }
            ConfigError::Json(why) => write!(f, "malformed configuration: {}", why),
            ConfigError::Io(why) => write!(f, "could not read configuration: {}", why),
        }
    }
}

impl error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(why: serde_json::Error) -> Self {
        Self::Json(why)
    }
}

/// How the position of the tracked vehicle is obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PositionConfig {
    Fixed {
        latitude: f64,
        longitude: f64,
    },
    Simulated {
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    },
}

impl PositionConfig {
    pub fn source(&self) -> Arc<dyn VehiclePositionSource> {
        match *self {
            PositionConfig::Fixed {
                latitude,
                longitude,
            } => Arc::new(FixedPosition(Coordinate::new(latitude, longitude))),
            PositionConfig::Simulated {
                latitude,
                longitude,
                radius_km,
            } => Arc::new(SimulatedPosition::new(
                Coordinate::new(latitude, longitude),
                radius_km,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaConfig {
    #[serde(flatten)]
    pub report: ReportParameters,
    pub vehicle: PositionConfig,
    #[serde(default)]
    pub vehicle_seed: Option<PathBuf>,
}

impl EtaConfig {
    /// Reads the file named by `ETA_CONFIG` (default `conf.json`), or the
    /// environment if that file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::from_file_or_vars(path, |key| env::var(key).ok())
    }

    pub fn from_file_or_vars<P, F>(path: P, var: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_json(&content),
            Err(why) if why.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "{} not found, reading configuration from environment",
                    path.as_ref().display()
                );
                Self::from_vars(var)
            }
            Err(why) => Err(ConfigError::Io(why)),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reporting_route = parse_or(&var, "ETA_REPORTING_ROUTE", 0)?;
        let snapping_route = parse_or(&var, "ETA_SNAPPING_ROUTE", reporting_route)?;
        let waypoints: Vec<Waypoint> = match var("ETA_WAYPOINTS") {
            Some(raw) => serde_json::from_str(&raw)?,
            None => vec![],
        };

        let latitude = parse(&var, "ETA_VEHICLE_LATITUDE")?
            .ok_or(ConfigError::Missing("ETA_VEHICLE_LATITUDE"))?;
        let longitude = parse(&var, "ETA_VEHICLE_LONGITUDE")?
            .ok_or(ConfigError::Missing("ETA_VEHICLE_LONGITUDE"))?;
        let vehicle = match parse(&var, "ETA_VEHICLE_JITTER_KM")? {
            Some(radius_km) => PositionConfig::Simulated {
                latitude,
                longitude,
                radius_km,
            },
            None => PositionConfig::Fixed {
                latitude,
                longitude,
            },
        };

        Ok(Self {
            report: ReportParameters {
                reporting_route,
                snapping_route,
                waypoints,
            },
            vehicle,
            vehicle_seed: var("ETA_VEHICLE_SEED").map(PathBuf::from),
        })
    }
}

fn parse<F, T>(var: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}

fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    parse(var, key).map(|value| value.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_json_configuration() {
        let config = EtaConfig::from_json(
            r#"{
                "reportingRoute": 0,
                "snappingRoute": 2,
                "waypoints": [
                    { "label": "BlitmanToUnion", "start": 18, "end": 276 },
                    { "label": "UnionToBlitman", "start": 276, "end": 18 }
                ],
                "vehicle": { "kind": "simulated", "latitude": 42.73166, "longitude": -73.68559, "radiusKm": 0.2 },
                "vehicleSeed": "seed/vehicle_seed.json"
            }"#,
        )
        .unwrap();
        assert_eq!(0, config.report.reporting_route);
        assert_eq!(2, config.report.snapping_route);
        assert_eq!(Waypoint::new("UnionToBlitman", 276, 18), config.report.waypoints[1]);
        assert_eq!(
            PositionConfig::Simulated {
                latitude: 42.73166,
                longitude: -73.68559,
                radius_km: 0.2
            },
            config.vehicle
        );
        assert_eq!(Some(PathBuf::from("seed/vehicle_seed.json")), config.vehicle_seed);
    }

    #[test]
    fn snapping_route_defaults_to_reporting_route() {
        let config = EtaConfig::from_vars(vars(&[
            ("ETA_REPORTING_ROUTE", "1"),
            ("ETA_VEHICLE_LATITUDE", "42.7"),
            ("ETA_VEHICLE_LONGITUDE", "-73.6"),
        ]))
        .unwrap();
        assert_eq!(1, config.report.reporting_route);
        assert_eq!(1, config.report.snapping_route);
        assert!(config.report.waypoints.is_empty());
        assert_eq!(
            PositionConfig::Fixed {
                latitude: 42.7,
                longitude: -73.6
            },
            config.vehicle
        );
        assert!(config.vehicle_seed.is_none());
    }

    #[test]
    fn reads_waypoints_and_jitter_from_environment() {
        let config = EtaConfig::from_vars(vars(&[
            ("ETA_SNAPPING_ROUTE", "2"),
            ("ETA_WAYPOINTS", r#"[{"label": "A", "start": 1, "end": 0}]"#),
            ("ETA_VEHICLE_LATITUDE", "42.7"),
            ("ETA_VEHICLE_LONGITUDE", "-73.6"),
            ("ETA_VEHICLE_JITTER_KM", "0.5"),
        ]))
        .unwrap();
        assert_eq!(0, config.report.reporting_route);
        assert_eq!(2, config.report.snapping_route);
        assert_eq!(vec![Waypoint::new("A", 1, 0)], config.report.waypoints);
        assert!(matches!(config.vehicle, PositionConfig::Simulated { radius_km, .. } if radius_km == 0.5));
    }

    #[test]
    fn missing_vehicle_position_is_reported() {
        let result = EtaConfig::from_vars(vars(&[("ETA_VEHICLE_LATITUDE", "42.7")]));
        assert!(matches!(
            result,
            Err(ConfigError::Missing("ETA_VEHICLE_LONGITUDE"))
        ));
    }

    #[test]
    fn malformed_values_are_reported() {
        let result = EtaConfig::from_vars(vars(&[
            ("ETA_REPORTING_ROUTE", "west"),
            ("ETA_VEHICLE_LATITUDE", "42.7"),
            ("ETA_VEHICLE_LONGITUDE", "-73.6"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "ETA_REPORTING_ROUTE", .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_environment() {
        let config = EtaConfig::from_file_or_vars(
            "/nonexistent/eta/conf.json",
            vars(&[
                ("ETA_VEHICLE_LATITUDE", "1"),
                ("ETA_VEHICLE_LONGITUDE", "2"),
            ]),
        )
        .unwrap();
        assert_eq!(
            PositionConfig::Fixed {
                latitude: 1.0,
                longitude: 2.0
            },
            config.vehicle
        );
    }
}

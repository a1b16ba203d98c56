use std::{error, fmt};

/// Invalid input handed to a distance calculation. Always a caller or data bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A route without any points.
    EmptyRoute,
    /// A vertex index past the end of the route.
    IndexOutOfRange { index: usize, len: usize },
    /// A route selector past the end of the route list.
    RouteSelectorOutOfRange { index: usize, len: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyRoute => write!(f, "route has no points"),
            InputError::IndexOutOfRange { index, len } => write!(
                f,
                "vertex index {} is out of range for a route with {} points",
                index, len
            ),
            InputError::RouteSelectorOutOfRange { index, len } => write!(
                f,
                "route {} was selected, but only {} routes exist",
                index, len
            ),
        }
    }
}

impl error::Error for InputError {}

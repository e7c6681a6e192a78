//! Generator errors and error marks

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Location, Size};
use crate::grid::Modifier;

/// Errors raised while preparing, carving or joining a maze
#[derive(Error, Debug, Clone)]
pub enum GeneratorError {
    /// A configuration or structural problem that can be located in the grid
    #[error("{message}")]
    Generator {
        message: String,
        location: Location,
        size: Size,
    },

    /// A modifier could not be applied
    #[error("modifier '{modifier}': {message}")]
    Modifier {
        modifier: Box<Modifier>,
        message: String,
    },

    /// Joining the paths failed; this is the only retryable error
    #[error(
        "Could not join all paths with any other end points that are not marked as dead-ends. \
         Make sure there is a path between all end points. The unconnected path groups are: {}",
        format_groups(.groups)
    )]
    NoValidSolution { groups: Vec<Vec<u32>> },

    #[error("Invalid generator setup: {0}")]
    InvalidSetup(String),

    /// The room graph was built inconsistently
    #[error("Room graph construction failed: {0}")]
    Topology(String),
}

impl GeneratorError {
    pub fn generator(message: impl Into<String>, location: Location, size: Size) -> Self {
        GeneratorError::Generator {
            message: message.into(),
            location,
            size,
        }
    }

    pub fn modifier(modifier: &Modifier, message: impl Into<String>) -> Self {
        GeneratorError::Modifier {
            modifier: Box::new(modifier.clone()),
            message: message.into(),
        }
    }

    /// Only a failed join triggers a fresh carving attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeneratorError::NoValidSolution { .. })
    }
}

fn format_groups(groups: &[Vec<u32>]) -> String {
    let groups: Vec<String> = groups
        .iter()
        .map(|group| {
            let ids: Vec<String> = group.iter().map(|id| id.to_string()).collect();
            format!("({})", ids.join(", "))
        })
        .collect();
    groups.join(", ")
}

/// An error recorded instead of raised, in error tolerant mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMark {
    pub location: Location,
    pub size: Size,
    pub message: String,
}

impl ErrorMark {
    pub fn new(location: Location, size: Size, message: impl Into<String>) -> Self {
        Self {
            location,
            size,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_solution_names_groups() {
        let err = GeneratorError::NoValidSolution {
            groups: vec![vec![1, 3], vec![2]],
        };
        let text = err.to_string();
        assert!(text.contains("(1, 3), (2)"), "{text}");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_generator_error_is_not_retryable() {
        let err = GeneratorError::generator("bad spot", Location::new(1, 2), Size::ONE);
        assert_eq!(err.to_string(), "bad spot");
        assert!(!err.is_retryable());
        assert!(!GeneratorError::InvalidSetup("x".into()).is_retryable());
    }
}

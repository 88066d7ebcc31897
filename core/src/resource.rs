//! The closed set of resources and operations the console manages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdminError;

/// A server-side collection addressable through `/admin/{operation}/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Workouts,
    WeightsLogs,
    Exercises,
    Wods,
    WeightWorkouts,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Workouts,
        Resource::WeightsLogs,
        Resource::Exercises,
        Resource::Wods,
        Resource::WeightWorkouts,
    ];

    /// Identifier used in request paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workouts => "workouts",
            Self::WeightsLogs => "weights_logs",
            Self::Exercises => "exercises",
            Self::Wods => "wods",
            Self::WeightWorkouts => "weight_workouts",
        }
    }

    /// Human readable name for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::Workouts => "Workouts",
            Self::WeightsLogs => "Weights Logs",
            Self::Exercises => "Exercises",
            Self::Wods => "WODs",
            Self::WeightWorkouts => "Weight Workouts",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AdminError::SchemaNotFound {
                resource: s.to_string(),
            })
    }
}

/// The CRUD-plus-empty action requested against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    View,
    Add,
    Update,
    Delete,
    Empty,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::View,
        Operation::Add,
        Operation::Update,
        Operation::Delete,
        Operation::Empty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Empty => "empty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Add => "Add",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Empty => "Empty",
        }
    }

    /// Operations that change server state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::View)
    }

    /// Operations whose payload must carry an integer `id`
    pub fn requires_id(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an operation name is not one of the five known ones
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Table and operation the admin console opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleDefaults {
    pub resource: Resource,
    pub operation: Operation,
}

impl Default for ConsoleDefaults {
    fn default() -> Self {
        Self {
            resource: Resource::Workouts,
            operation: Operation::View,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_identifiers_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
    }

    #[test]
    fn test_unknown_resource_is_schema_not_found() {
        let err = "sessions".parse::<Resource>().unwrap_err();
        assert_eq!(
            err,
            AdminError::SchemaNotFound {
                resource: "sessions".to_string()
            }
        );
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("empty".parse::<Operation>().unwrap(), Operation::Empty);
        assert!("truncate".parse::<Operation>().is_err());
        assert!(Operation::Update.requires_id());
        assert!(Operation::Delete.requires_id());
        assert!(!Operation::Add.requires_id());
        assert!(!Operation::View.is_mutation());
    }

    #[test]
    fn test_console_defaults_wire_format() {
        let defaults = ConsoleDefaults {
            resource: Resource::WeightWorkouts,
            operation: Operation::Add,
        };
        let json = serde_json::to_value(defaults).unwrap();
        assert_eq!(json, serde_json::json!({"resource": "weight_workouts", "operation": "add"}));
        assert_eq!(serde_json::from_value::<ConsoleDefaults>(json).unwrap(), defaults);
    }
}

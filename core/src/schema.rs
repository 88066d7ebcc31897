//! Static field schemas for every (resource, operation) pair
//!
//! The table below is the single source of truth for which inputs the admin
//! form shows. Resolution is a pure lookup: it never depends on anything the
//! server has returned.

use serde::Serialize;

use crate::error::AdminError;
use crate::resource::{Operation, Resource};

/// Semantic kind of a form field, driving both input widgets and coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Timestamp,
}

/// Static metadata describing one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub visible_for: &'static [Operation],
}

const EDIT_OPS: &[Operation] = &[Operation::Add, Operation::Update];
const ID_OPS: &[Operation] = &[Operation::Update, Operation::Delete];

/// Descriptor for the record identifier used by update and delete
pub const ID_FIELD: FieldDescriptor = FieldDescriptor {
    name: "id",
    label: "ID",
    kind: FieldKind::Integer,
    required: true,
    visible_for: ID_OPS,
};

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor {
        name,
        label,
        kind,
        required: true,
        visible_for: EDIT_OPS,
    }
}

const CARDIO_FIELDS: &[FieldDescriptor] = &[
    field("type", "Type", FieldKind::Text),
    field("duration_minutes", "Duration (minutes)", FieldKind::Integer),
    field("duration_seconds", "Duration (seconds)", FieldKind::Integer),
    field("distance", "Distance (kms)", FieldKind::Decimal),
    field("date", "Date", FieldKind::Timestamp),
];

const WEIGHTS_LOG_FIELDS: &[FieldDescriptor] = &[
    field("workout_type", "Workout Type", FieldKind::Text),
    field("date", "Date", FieldKind::Timestamp),
];

const EXERCISE_FIELDS: &[FieldDescriptor] = &[
    field("weights_log_id", "Weights Log ID", FieldKind::Integer),
    field("name", "Name", FieldKind::Text),
    field("set1", "Set 1", FieldKind::Integer),
    field("set2", "Set 2", FieldKind::Integer),
    field("set3", "Set 3", FieldKind::Integer),
];

const WEIGHT_WORKOUT_FIELDS: &[FieldDescriptor] = &[
    field("workout_type", "Workout Type", FieldKind::Text),
    field("exercise", "Exercise", FieldKind::Text),
];

static SCHEMAS: &[(Resource, &[FieldDescriptor])] = &[
    (Resource::Workouts, CARDIO_FIELDS),
    (Resource::WeightsLogs, WEIGHTS_LOG_FIELDS),
    (Resource::Exercises, EXERCISE_FIELDS),
    (Resource::Wods, CARDIO_FIELDS),
    (Resource::WeightWorkouts, WEIGHT_WORKOUT_FIELDS),
];

/// Canonical add/update fields of a resource, without `id`
pub fn canonical_fields(resource: Resource) -> Result<&'static [FieldDescriptor], AdminError> {
    SCHEMAS
        .iter()
        .find(|(r, _)| *r == resource)
        .map(|(_, fields)| *fields)
        .ok_or_else(|| AdminError::SchemaNotFound {
            resource: resource.to_string(),
        })
}

/// Ordered field descriptors the form must show for `(resource, operation)`.
///
/// View and empty need no input. Delete takes only the `id`. Add takes the
/// canonical fields, and update takes the same list with `id` in front.
pub fn resolve(resource: Resource, operation: Operation) -> Result<Vec<FieldDescriptor>, AdminError> {
    let canonical = canonical_fields(resource)?;
    let fields = match operation {
        Operation::View | Operation::Empty => Vec::new(),
        Operation::Delete => vec![ID_FIELD],
        Operation::Add => canonical.to_vec(),
        Operation::Update => std::iter::once(ID_FIELD)
            .chain(canonical.iter().copied())
            .collect(),
    };
    debug_assert!(fields.iter().all(|f| f.visible_for.contains(&operation)));
    Ok(fields)
}

/// Same as [`resolve`] for a resource identifier coming from outside the type system.
pub fn resolve_named(resource: &str, operation: Operation) -> Result<Vec<FieldDescriptor>, AdminError> {
    resolve(resource.parse()?, operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_view_and_empty_have_no_fields() {
        for resource in Resource::ALL {
            assert!(resolve(resource, Operation::View).unwrap().is_empty());
            assert!(resolve(resource, Operation::Empty).unwrap().is_empty());
        }
    }

    #[test]
    fn test_delete_is_single_id_field() {
        for resource in Resource::ALL {
            let fields = resolve(resource, Operation::Delete).unwrap();
            assert_eq!(fields, vec![ID_FIELD]);
            assert_eq!(fields[0].kind, FieldKind::Integer);
            assert!(fields[0].required);
        }
    }

    #[test]
    fn test_update_prepends_id() {
        for resource in Resource::ALL {
            let add = resolve(resource, Operation::Add).unwrap();
            let update = resolve(resource, Operation::Update).unwrap();
            assert_eq!(update[0], ID_FIELD);
            assert_eq!(&update[1..], add.as_slice());
            assert!(add.iter().all(|f| f.name != "id"));
        }
    }

    #[test]
    fn test_exercise_fields_in_order() {
        let fields = resolve(Resource::Exercises, Operation::Add).unwrap();
        assert_eq!(
            names(&fields),
            vec!["weights_log_id", "name", "set1", "set2", "set3"]
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for resource in Resource::ALL {
            for op in Operation::ALL {
                assert_eq!(resolve(resource, op).unwrap(), resolve(resource, op).unwrap());
            }
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = resolve_named("users", Operation::Add).unwrap_err();
        assert!(matches!(err, AdminError::SchemaNotFound { .. }));
    }
}

//! Declarative description of the admin form
//!
//! Front ends render a `Vec<FieldView>` with one generic function instead of
//! building markup per resource.

use serde::Serialize;

use crate::schema::{FieldDescriptor, FieldKind};

/// Input widget used for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Integer,
    Decimal,
    Text,
    DateTimeLocal,
}

impl InputKind {
    /// Value of the HTML `type` attribute
    pub fn html_type(&self) -> &'static str {
        match self {
            Self::Integer | Self::Decimal => "number",
            Self::Text => "text",
            Self::DateTimeLocal => "datetime-local",
        }
    }

    /// Value of the HTML `step` attribute, if any
    pub fn step(&self) -> Option<&'static str> {
        match self {
            Self::Integer => Some("1"),
            Self::Decimal => Some("any"),
            _ => None,
        }
    }

    /// Example shown by the terminal console
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Integer => "whole number",
            Self::Decimal => "decimal number",
            Self::Text => "text",
            Self::DateTimeLocal => "YYYY-MM-DDTHH:MM",
        }
    }
}

impl From<FieldKind> for InputKind {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Integer => Self::Integer,
            FieldKind::Decimal => Self::Decimal,
            FieldKind::Text => Self::Text,
            FieldKind::Timestamp => Self::DateTimeLocal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: &'static str,
    pub input: InputKind,
    pub name: &'static str,
    pub required: bool,
}

pub fn field_views(fields: &[FieldDescriptor]) -> Vec<FieldView> {
    fields
        .iter()
        .map(|f| FieldView {
            label: f.label,
            input: f.kind.into(),
            name: f.name,
            required: f.required,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Operation, Resource};
    use crate::schema::resolve;

    #[test]
    fn test_workout_update_views() {
        let fields = resolve(Resource::Workouts, Operation::Update).unwrap();
        let views = field_views(&fields);
        let types: Vec<_> = views.iter().map(|v| (v.name, v.input.html_type())).collect();
        assert_eq!(
            types,
            vec![
                ("id", "number"),
                ("type", "text"),
                ("duration_minutes", "number"),
                ("duration_seconds", "number"),
                ("distance", "number"),
                ("date", "datetime-local"),
            ]
        );
        assert_eq!(views[4].input.step(), Some("any"));
        assert!(views.iter().all(|v| v.required));
    }
}

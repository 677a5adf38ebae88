//! The runtime value accessors attached to output fields and resolver
//! methods.
//!
//! An output-field accessor branches on what it receives: a raw keyed record
//! is read by wire name, a live typed instance by property name. The record
//! direction is lenient (records store wire representation already), the
//! object-to-wire direction always projects enum constants into wire string
//! form. A method accessor looks up its composite key in the externally owned
//! [`ResolverRegistry`](crate::ResolverRegistry) and forwards the call.

use crate::{
    config::EnumRepresentation,
    error::AccessError,
    runtime::{FieldSource, ResolverArgs, ResolverRegistry, RuntimeValue},
};
use serde::Serialize;

/// What the accessor has to do beyond a plain lookup, decided once at
/// synthesis time from the field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccessorShape {
    Plain,
    /// Records store date-times as ISO-8601 strings.
    DateTime,
    Enum {
        enum_name: String,
        /// The declared constants, captured for wire-string lookup.
        values: Vec<String>,
    },
    EnumList {
        enum_name: String,
        values: Vec<String>,
    },
}

/// The two-branch value accessor for one output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAccessor {
    pub wire_name: String,
    pub property_name: String,
    pub shape: AccessorShape,
    pub enum_representation: EnumRepresentation,
}

impl FieldAccessor {
    pub fn read(&self, source: FieldSource<'_>) -> Result<RuntimeValue, AccessError> {
        match source {
            FieldSource::Record(record) => {
                let value = record.get(&self.wire_name).cloned().unwrap_or(RuntimeValue::Null);
                self.read_from_record(value)
            }
            FieldSource::Instance(instance) => {
                let value = instance
                    .property(&self.property_name)
                    .unwrap_or(RuntimeValue::Null);
                Ok(self.project_from_instance(value))
            }
        }
    }

    fn read_from_record(&self, value: RuntimeValue) -> Result<RuntimeValue, AccessError> {
        match &self.shape {
            AccessorShape::Plain => Ok(value),
            AccessorShape::DateTime => self.parse_date_time(value),
            AccessorShape::Enum { enum_name, values } => match self.enum_representation {
                // Records already hold the wire representation.
                EnumRepresentation::WireStrings => Ok(value),
                EnumRepresentation::Constants => lookup_constant(enum_name, values, value),
            },
            AccessorShape::EnumList { enum_name, values } => match self.enum_representation {
                EnumRepresentation::WireStrings => Ok(value),
                EnumRepresentation::Constants => match value {
                    RuntimeValue::List(items) => items
                        .into_iter()
                        .map(|item| lookup_constant(enum_name, values, item))
                        .collect::<Result<Vec<_>, _>>()
                        .map(RuntimeValue::List),
                    other => Ok(other),
                },
            },
        }
    }

    fn parse_date_time(&self, value: RuntimeValue) -> Result<RuntimeValue, AccessError> {
        match value {
            RuntimeValue::String(text) => chrono::DateTime::parse_from_rfc3339(&text)
                .map(RuntimeValue::DateTime)
                .map_err(|_| AccessError::InvalidDateTime {
                    wire_name: self.wire_name.clone(),
                    value: text,
                }),
            // Null passes through, and an already-parsed value is left alone.
            other => Ok(other),
        }
    }

    fn project_from_instance(&self, value: RuntimeValue) -> RuntimeValue {
        match &self.shape {
            AccessorShape::Plain | AccessorShape::DateTime => value,
            AccessorShape::Enum { .. } => project_enum(value),
            AccessorShape::EnumList { .. } => match value {
                RuntimeValue::List(items) => {
                    RuntimeValue::List(items.into_iter().map(project_enum).collect())
                }
                // A null list is tolerated.
                other => other,
            },
        }
    }
}

fn project_enum(value: RuntimeValue) -> RuntimeValue {
    match value {
        RuntimeValue::Enum { value, .. } => RuntimeValue::String(value),
        other => other,
    }
}

fn lookup_constant(
    enum_name: &str,
    declared: &[String],
    value: RuntimeValue,
) -> Result<RuntimeValue, AccessError> {
    match value {
        RuntimeValue::String(text) => {
            if declared.iter().any(|candidate| *candidate == text) {
                Ok(RuntimeValue::Enum {
                    enum_name: enum_name.to_owned(),
                    value: text,
                })
            } else {
                Err(AccessError::UnknownEnumValue {
                    enum_name: enum_name.to_owned(),
                    value: text,
                })
            }
        }
        other => Ok(other),
    }
}

/// The registry-dispatch accessor for one resolver-marked method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodAccessor {
    /// Composite dispatch key, `"ClassName.methodName"`.
    pub key: String,
}

impl MethodAccessor {
    /// Forwards `(source, args)` to the registered callback and returns its
    /// result unmodified. No type coercion happens at this layer.
    pub fn dispatch(
        &self,
        registry: &ResolverRegistry,
        source: FieldSource<'_>,
        args: &ResolverArgs,
    ) -> Result<RuntimeValue, AccessError> {
        let callback = registry.get(&self.key).ok_or_else(|| AccessError::MissingResolver {
            key: self.key.clone(),
        })?;
        Ok(callback(source, args))
    }
}

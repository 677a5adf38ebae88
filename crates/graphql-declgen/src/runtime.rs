//! The dynamic value model the generated accessors operate over at
//! query-execution time, and the process-wide resolver registry they dispatch
//! through.
//!
//! The registry is owned and populated by application startup code. This core
//! only emits the lookup-and-invoke glue.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Arguments passed to a resolver callback, in declaration order.
pub type ResolverArgs = IndexMap<String, RuntimeValue>;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    DateTime(chrono::DateTime<chrono::FixedOffset>),
    /// A live enum constant, as opposed to its wire-form name string.
    Enum { enum_name: String, value: String },
    List(Vec<RuntimeValue>),
    Record(IndexMap<String, RuntimeValue>),
}

impl RuntimeValue {
    pub fn string(value: impl Into<String>) -> Self {
        RuntimeValue::String(value.into())
    }

    pub fn enum_constant(enum_name: impl Into<String>, value: impl Into<String>) -> Self {
        RuntimeValue::Enum {
            enum_name: enum_name.into(),
            value: value.into(),
        }
    }
}

/// What a generated accessor receives at runtime: either a raw keyed record
/// or a live typed instance.
#[derive(Clone, Copy)]
pub enum FieldSource<'a> {
    Record(&'a IndexMap<String, RuntimeValue>),
    Instance(&'a dyn TypedInstance),
}

/// How a live object exposes its properties to the generated accessors.
pub trait TypedInstance {
    /// The value of the named property, or `None` if the instance has no such
    /// property.
    fn property(&self, name: &str) -> Option<RuntimeValue>;
}

/// A resolver implementation registered by the application.
pub type ResolverCallback =
    Box<dyn Fn(FieldSource<'_>, &ResolverArgs) -> RuntimeValue + Send + Sync>;

/// The process-wide mapping from composite method keys
/// (`"ClassName.methodName"`) to resolver implementations.
///
/// Populated by application startup code, consumed by the dispatch accessors
/// the generator emits. Never written by the synthesis core.
#[derive(Default)]
pub struct ResolverRegistry {
    callbacks: HashMap<String, ResolverCallback>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        callback: impl Fn(FieldSource<'_>, &ResolverArgs) -> RuntimeValue + Send + Sync + 'static,
    ) {
        self.callbacks.insert(key.into(), Box::new(callback));
    }

    pub fn get(&self, key: &str) -> Option<&ResolverCallback> {
        self.callbacks.get(key)
    }
}

/// Records usually arrive as deserialized JSON. Numbers without a fractional
/// part become `Int`, everything else maps structurally.
impl From<serde_json::Value> for RuntimeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RuntimeValue::Null,
            serde_json::Value::Bool(b) => RuntimeValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(int) => RuntimeValue::Int(int),
                None => RuntimeValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => RuntimeValue::String(s),
            serde_json::Value::Array(items) => {
                RuntimeValue::List(items.into_iter().map(RuntimeValue::from).collect())
            }
            serde_json::Value::Object(entries) => RuntimeValue::Record(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RuntimeValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("keys", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

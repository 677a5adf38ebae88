//! Error taxonomy.
//!
//! [`SynthesisError`] aborts the single declaration being synthesized; the
//! host pipeline decides whether the whole build halts. [`AccessError`] is
//! raised at generated-code runtime, inside the accessors, and is reported by
//! whatever executes queries later.

/// A fatal synthesis-time error. Aborts only the declaration being processed;
/// no partial descriptor stays visible in the registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// No inference rule matched a member's type.
    #[error("cannot infer a schema type for `{owner}.{member}`: unresolved type `{type_name}`")]
    TypeInference {
        owner: String,
        member: String,
        type_name: String,
    },

    /// A structurally disallowed combination.
    #[error("invalid usage: {message}")]
    InvalidUsage { message: String },

    /// A union annotation with zero resolvable member types.
    #[error("union `{union_name}` has no resolvable member types")]
    EmptyUnion { union_name: String },
}

/// An error raised inside a generated accessor at query-execution time.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    /// A resolver-marked method's dispatch key has no registered
    /// implementation.
    #[error("no resolver registered for `{key}`")]
    MissingResolver { key: String },

    /// No enum constant matches the stored wire-form string.
    #[error("`{value}` is not a value of enum `{enum_name}`")]
    UnknownEnumValue { enum_name: String, value: String },

    /// A stored date-time string is not valid ISO-8601.
    #[error("field `{wire_name}` holds `{value}`, which is not a valid date-time")]
    InvalidDateTime { wire_name: String, value: String },
}

//! Synthesis configuration and the naming-context boundary.

use heck::{ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use serde::Serialize;

/// How enum constants are represented by the consuming schema-runtime.
///
/// This drives both the backing value of emitted enum descriptors and the
/// record branch of enum-typed field accessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EnumRepresentation {
    /// The runtime stores wire-form name strings. Records pass through
    /// unchanged.
    #[default]
    WireStrings,
    /// The runtime expects live enum constants. Record values are resolved
    /// against the declared constants by wire-form string comparison.
    Constants,
}

/// Maps a field's source identifier to its wire-visible name. Supplied by the
/// host per generation request; an explicit rename directive on a field
/// always wins over this transformation.
pub trait NamingContext {
    fn wire_name(&self, source_name: &str) -> String;
}

/// The stock naming contexts, backed by `heck`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseConvention {
    #[default]
    Preserve,
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
}

impl NamingContext for CaseConvention {
    fn wire_name(&self, source_name: &str) -> String {
        match self {
            CaseConvention::Preserve => source_name.to_owned(),
            CaseConvention::Camel => source_name.to_lower_camel_case(),
            CaseConvention::Pascal => source_name.to_pascal_case(),
            CaseConvention::Snake => source_name.to_snake_case(),
            CaseConvention::ScreamingSnake => source_name.to_shouty_snake_case(),
        }
    }
}

/// Project-wide generation settings.
#[derive(Debug, Clone, Default)]
pub struct SynthesisConfig {
    /// The conventional leading prefix token stripped from declared class
    /// names when deriving SDL type names.
    pub type_prefix: Option<String>,
    pub enum_representation: EnumRepresentation,
}

impl SynthesisConfig {
    pub fn with_type_prefix(prefix: impl Into<String>) -> Self {
        SynthesisConfig {
            type_prefix: Some(prefix.into()),
            ..SynthesisConfig::default()
        }
    }
}

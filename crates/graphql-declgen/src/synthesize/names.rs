//! Wire-name and SDL-type-name derivation.

use crate::{config::NamingContext, declarations::FieldDecl};
use heck::ToLowerCamelCase;

/// Strips the single leading underscore that marks a host identifier as
/// private relative to its SDL name. One fixed convention, deliberately
/// narrow: anything else passes through untouched.
pub(crate) fn strip_private_prefix(name: &str) -> &str {
    name.strip_prefix('_').unwrap_or(name)
}

/// Derives the SDL-visible type name from a declared class name.
///
/// The conventional leading prefix token is stripped if present. For input
/// direction a trailing `Input` suffix is stripped and re-appended, so a
/// class already named with an explicit `...Input` suffix does not end up
/// double-suffixed.
pub(crate) fn graphql_type_name_for(name: &str, is_input: bool, prefix: Option<&str>) -> String {
    let mut base = name;
    if let Some(prefix) = prefix {
        if let Some(stripped) = base.strip_prefix(prefix) {
            if !stripped.is_empty() {
                base = stripped;
            }
        }
    }

    if is_input {
        let trimmed = base.strip_suffix("Input").unwrap_or(base);
        let derived = format!("{trimmed}Input");
        if derived.starts_with('_') {
            derived
        } else {
            format!("_{derived}")
        }
    } else {
        format!("_{base}")
    }
}

/// The name of the generated top-level binding for a type:
/// `<camelCaseTypeName><Input>GraphQLType`.
pub(crate) fn binding_name_for(sdl_name: &str) -> String {
    format!(
        "{}GraphQLType",
        sdl_name.trim_start_matches('_').to_lower_camel_case()
    )
}

/// The wire-visible name of a field: an explicit rename directive always
/// overrides the naming context's transformation.
pub(crate) fn wire_name_for(field: &FieldDecl, naming: &dyn NamingContext) -> String {
    field
        .wire_name
        .clone()
        .unwrap_or_else(|| naming.wire_name(&field.name))
}

/// Strips doc-comment markup from documentation text.
pub(crate) fn clean_docs(docs: &str) -> Option<String> {
    let cleaned = docs
        .lines()
        .map(|line| {
            line.trim_start()
                .trim_start_matches("///")
                .trim_start_matches("/**")
                .trim_start_matches("*/")
                .trim_start_matches("* ")
                .trim_start_matches('*')
                .trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

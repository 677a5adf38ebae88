//! Member collection over the inheritance chain.
//!
//! The order returned here becomes the wire order of the generated schema
//! fields, so it has to be deterministic: derived-to-base, declaration order
//! within each level, first occurrence by name wins.

use crate::{
    classify,
    declarations::{ClassDecl, DeclarationSet, FieldDecl, MethodDecl},
};
use std::collections::HashSet;

/// Collects the non-static, non-synthetic fields of `class` and its
/// ancestors, up to but excluding the universal root. A field already
/// collected from a more-derived level shadows an ancestor's.
pub(crate) fn collect_fields<'a>(decls: &'a DeclarationSet, class: &'a ClassDecl) -> Vec<&'a FieldDecl> {
    let mut seen = HashSet::new();
    let mut collected = Vec::new();

    for level in decls.supertype_chain(class) {
        for field in &level.fields {
            if field.is_static || field.is_synthetic {
                continue;
            }
            if seen.insert(field.name.as_str()) {
                collected.push(field);
            }
        }
    }

    collected
}

/// Collects the resolver-marked methods of `class` and its ancestors, with
/// the same walk and dedup rules as [`collect_fields`].
pub(crate) fn collect_resolver_methods<'a>(
    decls: &'a DeclarationSet,
    class: &'a ClassDecl,
) -> Vec<&'a MethodDecl> {
    let mut seen = HashSet::new();
    let mut collected = Vec::new();

    for level in decls.supertype_chain(class) {
        for method in &level.methods {
            if !classify::is_marked_resolver(method) {
                continue;
            }
            if seen.insert(method.name.as_str()) {
                collected.push(method);
            }
        }
    }

    collected
}

//! The type inference engine: maps a declared type reference to a
//! schema-type expression, in strict rule order.
//!
//! Non-null wrapping is applied by call sites, not here: every caller checks
//! the source type's nullability and wraps through [`wrap_non_null`]. This
//! keeps the rules themselves independent of nullability.

use crate::{
    classify,
    declarations::{ClassDecl, DeclarationSet, TypeRef},
    descriptors::SchemaType,
    error::SynthesisError,
    synthesize::names::strip_private_prefix,
};
use std::collections::HashMap;

/// Whether a type is being inferred for an input-object position or an
/// output-object position. Unions are output-only; self-references are
/// meaningful only in input direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

/// Memoization of cross-type resolution, keyed by referenced type name.
///
/// Scoped to a single declaration's synthesis pass. The same referenced type
/// is visited once per field or parameter that uses it; resolving it beyond
/// the first time is wasted work.
#[derive(Debug, Default)]
pub(crate) struct PassCache {
    resolved: HashMap<String, SchemaType>,
}

/// Wraps the inferred expression in `NonNull` when the source type was
/// declared non-null.
pub(crate) fn wrap_non_null(inferred: SchemaType, source: &TypeRef) -> SchemaType {
    if source.is_non_null() {
        inferred.non_null()
    } else {
        inferred
    }
}

/// Infers the schema type of `ty`, declared on `owner.member`.
///
/// Rule order: self-reference (input only), scalar, iterable, enum, marked
/// output type, marked input type, marked union. Anything else is a
/// [`SynthesisError::TypeInference`].
pub(crate) fn infer_schema_type(
    decls: &DeclarationSet,
    cache: &mut PassCache,
    owner: &ClassDecl,
    member: &str,
    ty: &TypeRef,
    direction: Direction,
) -> Result<SchemaType, SynthesisError> {
    // Self-reference special case, before general inference: the owner's own
    // descriptor does not exist yet, so it must never be looked up. The
    // deferred two-phase construction resolves the placeholder later.
    if direction == Direction::Input {
        if classify::is_self_type(ty, owner) {
            return Ok(SchemaType::SelfRef);
        }
        if let Some(element) = classify::iterable_element_type(ty) {
            if classify::is_self_type(element, owner) {
                return Ok(SchemaType::List(Box::new(wrap_non_null(
                    SchemaType::SelfRef,
                    element,
                ))));
            }
        }
    }

    if let Some(scalar) = classify::scalar_for(decls, ty) {
        return Ok(SchemaType::Scalar(scalar));
    }

    if let Some(element) = classify::iterable_element_type(ty) {
        let inner = infer_schema_type(decls, cache, owner, member, element, direction)?;
        return Ok(SchemaType::List(Box::new(wrap_non_null(inner, element))));
    }

    infer_named_reference(decls, cache, owner, member, ty, direction)
}

/// Rules 4-7: a reference to another declared type. Consults the pass-scoped
/// cache first when the reference points at a type other than the owner.
fn infer_named_reference(
    decls: &DeclarationSet,
    cache: &mut PassCache,
    owner: &ClassDecl,
    member: &str,
    ty: &TypeRef,
    direction: Direction,
) -> Result<SchemaType, SynthesisError> {
    let cacheable = ty.name != owner.name;
    if cacheable {
        if let Some(resolved) = cache.resolved.get(&ty.name) {
            return validate_direction(resolved.clone(), member, direction);
        }
    }

    let resolved = if classify::is_enum(decls, ty) {
        SchemaType::Enum(ty.name.clone())
    } else if let Some(class) = decls.class(&ty.name) {
        if classify::is_marked_output_type(decls, class) {
            SchemaType::Object(strip_private_prefix(&ty.name).to_owned())
        } else if classify::is_marked_input_type(class) {
            SchemaType::Input(ty.name.clone())
        } else if classify::is_marked_union(class) {
            SchemaType::Union(ty.name.clone())
        } else {
            return Err(type_inference_error(owner, member, ty));
        }
    } else {
        return Err(type_inference_error(owner, member, ty));
    };

    if cacheable {
        cache.resolved.insert(ty.name.clone(), resolved.clone());
    }

    validate_direction(resolved, member, direction)
}

/// Unions are output-only.
fn validate_direction(
    resolved: SchemaType,
    member: &str,
    direction: Direction,
) -> Result<SchemaType, SynthesisError> {
    if direction == Direction::Input {
        if let SchemaType::Union(name) = &resolved {
            return Err(SynthesisError::InvalidUsage {
                message: format!("union type `{name}` cannot be referenced from input field `{member}`"),
            });
        }
    }
    Ok(resolved)
}

fn type_inference_error(owner: &ClassDecl, member: &str, ty: &TypeRef) -> SynthesisError {
    SynthesisError::TypeInference {
        owner: owner.name.clone(),
        member: member.to_owned(),
        type_name: ty.name.clone(),
    }
}

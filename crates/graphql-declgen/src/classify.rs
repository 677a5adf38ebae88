//! Pure predicate and extraction functions over the declaration model.
//!
//! Every inference decision point goes through this module instead of
//! re-checking markers at the call site. None of these functions fail:
//! insufficient information yields `None`.

use crate::{
    declarations::{ClassDecl, DeclarationSet, MethodDecl, TypeRef, ASYNC_WRAPPER, ITERABLE, OBJECT_SUPERTYPE},
    descriptors::ScalarType,
};

pub(crate) fn is_enum(decls: &DeclarationSet, ty: &TypeRef) -> bool {
    decls.enum_decl(&ty.name).is_some()
}

pub(crate) fn is_iterable(ty: &TypeRef) -> bool {
    ty.name == ITERABLE
}

/// The first type argument of an iterable, if any.
pub(crate) fn iterable_element_type(ty: &TypeRef) -> Option<&TypeRef> {
    if is_iterable(ty) {
        ty.args.first()
    } else {
        None
    }
}

/// Whether `name` is the universal root supertype. Used as the stop condition
/// for inheritance walks.
pub(crate) fn is_object_supertype(name: &str) -> bool {
    name == OBJECT_SUPERTYPE
}

/// Whether `ty` resolves to exactly the owning declaration.
pub(crate) fn is_self_type(ty: &TypeRef, owner: &ClassDecl) -> bool {
    ty.name == owner.name
}

pub(crate) fn is_self_or_list_of_self(ty: &TypeRef, owner: &ClassDecl) -> bool {
    is_self_type(ty, owner)
        || iterable_element_type(ty).is_some_and(|element| is_self_type(element, owner))
}

/// Whether the class carries the output-type marker, walking the supertype
/// chain: a subclass of an annotated class still counts.
pub(crate) fn is_marked_output_type(decls: &DeclarationSet, class: &ClassDecl) -> bool {
    decls
        .supertype_chain(class)
        .any(|ancestor| ancestor.markers.output_type)
}

pub(crate) fn is_marked_input_type(class: &ClassDecl) -> bool {
    class.markers.input_type
}

pub(crate) fn is_marked_union(class: &ClassDecl) -> bool {
    class.markers.union.is_some()
}

pub(crate) fn is_marked_resolver(method: &MethodDecl) -> bool {
    method.is_resolver
}

/// An abstract class is a GraphQL interface unless it also carries the
/// serializable marker, which indicates a concrete data-class pattern.
pub(crate) fn is_interface_kind(class: &ClassDecl) -> bool {
    class.is_abstract && !class.markers.serializable
}

/// Classifies a primitive type reference. Matching is by assignability, not
/// exact identity: a class whose supertype chain reaches `DateTime` still
/// matches.
pub(crate) fn scalar_for(decls: &DeclarationSet, ty: &TypeRef) -> Option<ScalarType> {
    match ty.name.as_str() {
        "String" => Some(ScalarType::String),
        "Int" => Some(ScalarType::Int),
        "Float" => Some(ScalarType::Float),
        "Boolean" => Some(ScalarType::Boolean),
        "DateTime" => Some(ScalarType::DateTime),
        _ => decls.class(&ty.name).and_then(|class| {
            decls
                .supertype_chain(class)
                .any(|ancestor| ancestor.supertype.as_deref() == Some("DateTime"))
                .then_some(ScalarType::DateTime)
        }),
    }
}

/// Unwraps a single level of asynchronous-result wrapping: a `Future` of `T`
/// becomes `T`. Applies to method return types only.
pub(crate) fn future_inner(ty: &TypeRef) -> Option<&TypeRef> {
    if ty.name == ASYNC_WRAPPER {
        ty.args.first()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::Markers;

    fn decls_with_annotated_base() -> DeclarationSet {
        let mut decls = DeclarationSet::new();
        decls.push_class(ClassDecl {
            markers: Markers {
                output_type: true,
                ..Markers::default()
            },
            ..ClassDecl::new("Base")
        });
        decls.push_class(ClassDecl {
            supertype: Some("Base".into()),
            ..ClassDecl::new("Derived")
        });
        decls
    }

    #[test]
    fn output_marker_is_inherited() {
        let decls = decls_with_annotated_base();
        let derived = decls.class("Derived").unwrap();
        assert!(is_marked_output_type(&decls, derived));
    }

    #[test]
    fn serializable_abstract_class_is_not_an_interface() {
        let mut class = ClassDecl::new("Data");
        class.is_abstract = true;
        class.markers.serializable = true;
        assert!(!is_interface_kind(&class));

        class.markers.serializable = false;
        assert!(is_interface_kind(&class));
    }

    #[test]
    fn datetime_subclass_matches_by_assignability() {
        let mut decls = DeclarationSet::new();
        decls.push_class(ClassDecl {
            supertype: Some("DateTime".into()),
            ..ClassDecl::new("Timestamp")
        });
        assert_eq!(
            scalar_for(&decls, &TypeRef::non_null("Timestamp")),
            Some(ScalarType::DateTime)
        );
    }

    #[test]
    fn list_of_self_is_detected() {
        let owner = ClassDecl::new("Category");
        let ty = TypeRef::non_null(ITERABLE).with_args(vec![TypeRef::non_null("Category")]);
        assert!(is_self_or_list_of_self(&ty, &owner));

        let other = TypeRef::non_null(ITERABLE).with_args(vec![TypeRef::non_null("Other")]);
        assert!(!is_self_or_list_of_self(&other, &owner));
    }
}

//! Output mode: synthesizes an [`ObjectDescriptor`] and its generated unit.

use super::{names, Context};
use crate::{
    accessors::{AccessorShape, FieldAccessor, MethodAccessor},
    classify, collect,
    declarations::{ClassDecl, DeclarationSet, FieldDecl, MethodDecl, TypeRef},
    descriptors::{
        FieldDescriptor, InputArgDescriptor, MethodFieldDescriptor, ObjectDescriptor, ScalarType,
    },
    emit,
    error::SynthesisError,
    infer::{infer_schema_type, wrap_non_null, Direction},
};

pub(super) fn synthesize_object(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
) -> Result<crate::emit::GeneratedUnit, SynthesisError> {
    let type_name = names::graphql_type_name_for(&class.name, false, ctx.type_prefix());

    let interfaces = class
        .interfaces
        .iter()
        .filter_map(|name| ctx.decls.class(name))
        .filter(|interface| classify::is_marked_output_type(ctx.decls, interface))
        .map(|interface| names::strip_private_prefix(&interface.name).to_owned())
        .collect();

    let mut fields = Vec::new();
    for field in collect::collect_fields(ctx.decls, class) {
        if !field.in_output {
            continue;
        }
        fields.push(synthesize_field(ctx, class, field)?);
    }

    let mut method_fields = Vec::new();
    for method in collect::collect_resolver_methods(ctx.decls, class) {
        method_fields.push(synthesize_method_field(ctx, class, method)?);
    }

    let descriptor = ObjectDescriptor {
        type_name,
        source_name: names::strip_private_prefix(&class.name).to_owned(),
        description: class.docs.as_deref().and_then(names::clean_docs),
        deprecation: class.deprecation.clone(),
        is_interface: classify::is_interface_kind(class),
        interfaces,
        fields,
        method_fields,
    };

    let unit = emit::render_object(&descriptor, &class.name, ctx.config);
    ctx.registry.insert_object(descriptor);
    Ok(unit)
}

fn synthesize_field(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
    field: &FieldDecl,
) -> Result<FieldDescriptor, SynthesisError> {
    let inferred = infer_schema_type(
        ctx.decls,
        &mut ctx.cache,
        class,
        &field.name,
        &field.ty,
        Direction::Output,
    )?;
    let ty = wrap_non_null(inferred, &field.ty);
    let wire_name = names::wire_name_for(field, ctx.naming);

    let accessor = FieldAccessor {
        wire_name: wire_name.clone(),
        property_name: field.name.clone(),
        shape: accessor_shape_for(ctx.decls, &field.ty),
        enum_representation: ctx.config.enum_representation,
    };

    Ok(FieldDescriptor {
        wire_name,
        ty,
        description: field.docs.as_deref().and_then(names::clean_docs),
        deprecation: field.deprecation.clone(),
        accessor,
    })
}

fn synthesize_method_field(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
    method: &MethodDecl,
) -> Result<MethodFieldDescriptor, SynthesisError> {
    // A `Future` of `T` resolves as `T`. Only one level is unwrapped.
    let return_type = classify::future_inner(&method.return_type).unwrap_or(&method.return_type);
    let inferred = infer_schema_type(
        ctx.decls,
        &mut ctx.cache,
        class,
        &method.name,
        return_type,
        Direction::Output,
    )?;
    let ty = wrap_non_null(inferred, return_type);

    let mut args = Vec::new();
    for (param_name, param_type) in &method.params {
        let inferred = infer_schema_type(
            ctx.decls,
            &mut ctx.cache,
            class,
            &method.name,
            param_type,
            Direction::Input,
        )?;
        args.push(InputArgDescriptor {
            name: param_name.clone(),
            ty: wrap_non_null(inferred, param_type),
        });
    }

    Ok(MethodFieldDescriptor {
        wire_name: method.name.clone(),
        ty,
        args,
        description: method.docs.as_deref().and_then(names::clean_docs),
        deprecation: method.deprecation.clone(),
        accessor: MethodAccessor {
            key: format!("{}.{}", class.name, method.name),
        },
    })
}

/// Decides what the field's runtime accessor has to do beyond a plain
/// lookup, from the declared type.
fn accessor_shape_for(decls: &DeclarationSet, ty: &TypeRef) -> AccessorShape {
    if classify::scalar_for(decls, ty) == Some(ScalarType::DateTime) {
        return AccessorShape::DateTime;
    }

    if let Some(decl) = decls.enum_decl(&ty.name) {
        return AccessorShape::Enum {
            enum_name: decl.name.clone(),
            values: declared_values(decl),
        };
    }

    if let Some(element) = classify::iterable_element_type(ty) {
        if let Some(decl) = decls.enum_decl(&element.name) {
            return AccessorShape::EnumList {
                enum_name: decl.name.clone(),
                values: declared_values(decl),
            };
        }
    }

    AccessorShape::Plain
}

fn declared_values(decl: &crate::declarations::EnumDecl) -> Vec<String> {
    decl.values
        .iter()
        .filter(|value| !value.is_synthetic)
        .map(|value| value.name.clone())
        .collect()
}

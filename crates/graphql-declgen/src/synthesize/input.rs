//! Input mode: synthesizes an [`InputObjectDescriptor`], choosing between
//! direct and deferred two-phase construction depending on self-reference.

use super::{names, Context};
use crate::{
    classify,
    collect,
    declarations::{ClassDecl, FieldDecl},
    descriptors::{InputFieldDescriptor, InputObjectDescriptor},
    emit,
    error::SynthesisError,
    infer::{infer_schema_type, wrap_non_null, Direction},
};

pub(super) fn synthesize_input(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
) -> Result<crate::emit::GeneratedUnit, SynthesisError> {
    let type_name = names::graphql_type_name_for(&class.name, true, ctx.type_prefix());
    let description = class.docs.as_deref().and_then(names::clean_docs);

    let fields: Vec<&FieldDecl> = collect::collect_fields(ctx.decls, class)
        .into_iter()
        .filter(|field| field.in_input)
        .collect();

    let has_self_reference = fields
        .iter()
        .any(|field| classify::is_self_or_list_of_self(&field.ty, class));

    if !has_self_reference {
        // Direct construction: the full field list is built up front and
        // passed in one constructor-style operation.
        let fields = build_input_fields(ctx, class, &fields)?;
        let descriptor = InputObjectDescriptor {
            type_name,
            source_name: class.name.clone(),
            description,
            fields,
        };
        let unit = emit::render_input_object(&descriptor, &class.name, false, ctx.config);
        ctx.registry.insert_input_object(descriptor);
        return Ok(unit);
    }

    // Deferred two-phase construction: the descriptor enters the registry
    // with an empty field list so it has a stable identity, then the field
    // list is attached with self-references resolved to that identity.
    ctx.registry.reserve_input_object(InputObjectDescriptor {
        type_name,
        source_name: class.name.clone(),
        description,
        fields: Vec::new(),
    });

    let built = build_input_fields(ctx, class, &fields);
    let fields = match built {
        Ok(fields) => fields,
        Err(error) => {
            // No partial descriptor may stay visible.
            ctx.registry.discard_input_object(&class.name);
            return Err(error);
        }
    };

    let fields: Vec<InputFieldDescriptor> = fields
        .into_iter()
        .map(|field| InputFieldDescriptor {
            wire_name: field.wire_name,
            ty: field.ty.resolve_self(&class.name),
            description: field.description,
            deprecation: field.deprecation,
        })
        .collect();

    ctx.registry.attach_input_fields(&class.name, fields);

    let descriptor = ctx
        .registry
        .input_object(&class.name)
        .expect("attached just above");
    Ok(emit::render_input_object(descriptor, &class.name, true, ctx.config))
}

fn build_input_fields(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
    fields: &[&FieldDecl],
) -> Result<Vec<InputFieldDescriptor>, SynthesisError> {
    fields
        .iter()
        .map(|field| {
            let inferred = infer_schema_type(
                ctx.decls,
                &mut ctx.cache,
                class,
                &field.name,
                &field.ty,
                Direction::Input,
            )?;
            Ok(InputFieldDescriptor {
                wire_name: names::wire_name_for(field, ctx.naming),
                ty: wrap_non_null(inferred, &field.ty),
                description: field.docs.as_deref().and_then(names::clean_docs),
                deprecation: field.deprecation.clone(),
            })
        })
        .collect()
}

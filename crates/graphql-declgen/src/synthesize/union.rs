//! Union descriptor construction from a literal member list.

use super::{names, Context};
use crate::{
    declarations::ClassDecl,
    descriptors::UnionDescriptor,
    emit,
    error::SynthesisError,
};

pub(super) fn synthesize_union(
    ctx: &mut Context<'_>,
    class: &ClassDecl,
) -> Result<crate::emit::GeneratedUnit, SynthesisError> {
    let Some(marker) = &class.markers.union else {
        return Err(SynthesisError::InvalidUsage {
            message: format!("`{}` is not marked as a union type", class.name),
        });
    };

    let type_name = marker
        .name
        .clone()
        .unwrap_or_else(|| names::graphql_type_name_for(&class.name, false, ctx.type_prefix()));

    let mut members = Vec::new();
    for member in &marker.members {
        if ctx.decls.class(&member.name).is_some() {
            members.push(names::strip_private_prefix(&member.name).to_owned());
        } else {
            ctx.diagnostics.push_warning(format!(
                "skipping union member `{}` of `{}`: it does not resolve to a class-like declaration",
                member.name, class.name
            ));
        }
    }

    if members.is_empty() {
        return Err(SynthesisError::EmptyUnion {
            union_name: class.name.clone(),
        });
    }

    let descriptor = UnionDescriptor {
        type_name,
        source_name: names::strip_private_prefix(&class.name).to_owned(),
        members,
    };

    let unit = emit::render_union(&descriptor, &class.name, ctx.config);
    ctx.registry.insert_union(descriptor);
    Ok(unit)
}

//! Enum descriptor construction.

use super::{names, Context};
use crate::{
    config::EnumRepresentation,
    declarations::EnumDecl,
    descriptors::{BackingValue, EnumTypeDescriptor, EnumValueDescriptor},
    emit,
    error::SynthesisError,
};

pub(super) fn synthesize_enum(
    ctx: &mut Context<'_>,
    decl: &EnumDecl,
) -> Result<crate::emit::GeneratedUnit, SynthesisError> {
    let values = decl
        .values
        .iter()
        .filter(|value| !value.is_synthetic)
        .map(|value| EnumValueDescriptor {
            wire_name: value.name.clone(),
            backing: match ctx.config.enum_representation {
                EnumRepresentation::WireStrings => BackingValue::Name(value.name.clone()),
                EnumRepresentation::Constants => BackingValue::Constant {
                    enum_name: decl.name.clone(),
                    value: value.name.clone(),
                },
            },
            description: value.docs.as_deref().and_then(names::clean_docs),
            deprecation: value.deprecation.clone(),
        })
        .collect();

    let descriptor = EnumTypeDescriptor {
        type_name: decl.name.clone(),
        source_name: decl.name.clone(),
        description: decl
            .description
            .clone()
            .or_else(|| decl.docs.as_deref().and_then(names::clean_docs)),
        values,
    };

    let unit = emit::render_enum(&descriptor, &decl.name, ctx.config);
    ctx.registry.insert_enum(descriptor);
    Ok(unit)
}

//! Compile-time schema compiler: inspects class and enum declarations
//! annotated with domain markers and synthesizes, for each one, an immutable
//! schema-type descriptor plus the glue that reads field values from either a
//! raw keyed record or a typed instance at runtime.
//!
//! The host build pipeline discovers annotated declarations, resolves them
//! into the [`DeclarationSet`] model, and invokes [`synthesize()`] once per
//! declaration. Each invocation publishes a descriptor into the shared
//! [`DescriptorRegistry`] and returns one [`GeneratedUnit`] of source text to
//! append into the compilation unit's [`GeneratedPart`].
//!
//! ```
//! use graphql_declgen::*;
//!
//! let mut decls = DeclarationSet::new();
//! let mut user = ClassDecl::new("User");
//! user.markers.output_type = true;
//! user.fields.push(FieldDecl::new("name", TypeRef::non_null("String")));
//! let user = decls.push_class(user).clone();
//!
//! let mut registry = DescriptorRegistry::new();
//! let result = synthesize(
//!     &decls,
//!     GenerationRequest {
//!         target: GenerationTarget::OutputType(&user),
//!         naming: &CaseConvention::Preserve,
//!     },
//!     &SynthesisConfig::default(),
//!     &mut registry,
//! );
//! let unit = result.into_result().unwrap();
//! assert_eq!(unit.binding_name, "userGraphQLType");
//! ```

mod accessors;
mod classify;
mod collect;
mod config;
mod declarations;
mod descriptors;
mod diagnostics;
mod emit;
mod error;
mod infer;
mod result;
mod runtime;
mod synthesize;

pub use accessors::{AccessorShape, FieldAccessor, MethodAccessor};
pub use config::{CaseConvention, EnumRepresentation, NamingContext, SynthesisConfig};
pub use declarations::{
    ClassDecl, DeclarationSet, EnumDecl, EnumValueDecl, FieldDecl, Markers, MethodDecl,
    Nullability, TypeRef, UnionMarker, ASYNC_WRAPPER, ITERABLE, OBJECT_SUPERTYPE,
};
pub use descriptors::{
    BackingValue, DescriptorRegistry, EnumTypeDescriptor, EnumValueDescriptor, FieldDescriptor,
    InputArgDescriptor, InputFieldDescriptor, InputObjectDescriptor, MethodFieldDescriptor,
    ObjectDescriptor, ScalarType, SchemaType, UnionDescriptor,
};
pub use diagnostics::Diagnostics;
pub use emit::{GeneratedPart, GeneratedUnit};
pub use error::{AccessError, SynthesisError};
pub use infer::Direction;
pub use result::SynthesisResult;
pub use runtime::{
    FieldSource, ResolverArgs, ResolverCallback, ResolverRegistry, RuntimeValue, TypedInstance,
};
pub use synthesize::{GenerationRequest, GenerationTarget};

/// Synthesizes the descriptor and generated unit for one annotated
/// declaration.
///
/// On success the descriptor is published into `registry`; on failure nothing
/// is, and the error points at the offending member. Warnings are carried on
/// the result either way.
pub fn synthesize(
    decls: &DeclarationSet,
    request: GenerationRequest<'_>,
    config: &SynthesisConfig,
    registry: &mut DescriptorRegistry,
) -> SynthesisResult {
    let (outcome, diagnostics) = synthesize::synthesize_declaration(decls, request, config, registry);

    match outcome {
        Ok(unit) => SynthesisResult {
            unit: Some(unit),
            error: None,
            diagnostics,
        },
        Err(error) => SynthesisResult {
            unit: None,
            error: Some(error),
            diagnostics,
        },
    }
}

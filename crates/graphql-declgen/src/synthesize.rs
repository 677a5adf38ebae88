//! The descriptor synthesizer: the orchestrator invoked once per annotated
//! declaration.

mod enums;
mod input;
pub(crate) mod names;
mod object;
mod union;

use crate::{
    config::{NamingContext, SynthesisConfig},
    declarations::{ClassDecl, DeclarationSet, EnumDecl},
    descriptors::DescriptorRegistry,
    diagnostics::Diagnostics,
    emit::GeneratedUnit,
    error::SynthesisError,
    infer::PassCache,
};

/// One generation request from the host pipeline: the declaration plus the
/// marker that triggered generation and the naming context to apply.
pub struct GenerationRequest<'a> {
    pub target: GenerationTarget<'a>,
    pub naming: &'a dyn NamingContext,
}

/// Which marker matched the declaration.
pub enum GenerationTarget<'a> {
    OutputType(&'a ClassDecl),
    InputType(&'a ClassDecl),
    Union(&'a ClassDecl),
    Enum(&'a EnumDecl),
}

impl GenerationTarget<'_> {
    fn name(&self) -> &str {
        match self {
            GenerationTarget::OutputType(class)
            | GenerationTarget::InputType(class)
            | GenerationTarget::Union(class) => &class.name,
            GenerationTarget::Enum(decl) => &decl.name,
        }
    }
}

/// Everything one synthesis pass needs, threaded by reference. The cache and
/// diagnostics are owned per pass; concurrent passes over other declarations
/// share nothing mutable.
pub(crate) struct Context<'a> {
    pub(crate) decls: &'a DeclarationSet,
    pub(crate) config: &'a SynthesisConfig,
    pub(crate) naming: &'a dyn NamingContext,
    pub(crate) registry: &'a mut DescriptorRegistry,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) cache: PassCache,
}

impl Context<'_> {
    pub(crate) fn type_prefix(&self) -> Option<&str> {
        self.config.type_prefix.as_deref()
    }
}

pub(crate) fn synthesize_declaration(
    decls: &DeclarationSet,
    request: GenerationRequest<'_>,
    config: &SynthesisConfig,
    registry: &mut DescriptorRegistry,
) -> (Result<GeneratedUnit, SynthesisError>, Diagnostics) {
    tracing::debug!(declaration = request.target.name(), "synthesizing declaration");

    let mut ctx = Context {
        decls,
        config,
        naming: request.naming,
        registry,
        diagnostics: Diagnostics::default(),
        cache: PassCache::default(),
    };

    let outcome = match request.target {
        GenerationTarget::OutputType(class) => object::synthesize_object(&mut ctx, class),
        GenerationTarget::InputType(class) => input::synthesize_input(&mut ctx, class),
        GenerationTarget::Union(class) => union::synthesize_union(&mut ctx, class),
        GenerationTarget::Enum(decl) => enums::synthesize_enum(&mut ctx, decl),
    };

    if let Err(error) = &outcome {
        tracing::debug!(%error, "synthesis failed");
    }

    (outcome, ctx.diagnostics)
}

use crate::{diagnostics::Diagnostics, emit::GeneratedUnit, error::SynthesisError};

/// The result of a [`synthesize()`](crate::synthesize()) invocation.
pub struct SynthesisResult {
    pub(crate) unit: Option<GeneratedUnit>,
    pub(crate) error: Option<SynthesisError>,
    pub(crate) diagnostics: Diagnostics,
}

impl SynthesisResult {
    /// Simplify the result data to a yes-no answer: did synthesis succeed?
    ///
    /// `Ok()` contains the emitted [GeneratedUnit]; the descriptor itself has
    /// already been published into the registry.
    pub fn into_result(self) -> Result<GeneratedUnit, SynthesisError> {
        match (self.unit, self.error) {
            (Some(unit), None) => Ok(unit),
            (_, Some(error)) => Err(error),
            // A missing unit always comes with an error.
            (None, None) => unreachable!("synthesis produced neither a unit nor an error"),
        }
    }

    /// Synthesis warnings. Warnings never abort a declaration.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Warnings produced during synthesis.
///
/// Fatal conditions go through [`crate::SynthesisError`] instead; diagnostics
/// never abort a declaration.
#[derive(Default, Debug)]
pub struct Diagnostics(Vec<String>);

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all warning messages.
    pub fn iter_warnings(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub(crate) fn push_warning(&mut self, message: String) {
        self.0.push(message);
    }
}

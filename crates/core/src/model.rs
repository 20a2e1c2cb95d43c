/// A deterministic mapping from a typed input to a typed output.
///
/// Models are the building blocks that simulators drive. A model should
/// always produce the same output for the same input, and any state it needs
/// from one call to the next must travel through its input.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type, allowing it to determine
    /// what constitutes a failure within its domain.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A model input paired with the output it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a snapshot from an input and its output.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

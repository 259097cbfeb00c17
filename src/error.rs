/// Fatal error taxonomy. Every variant ends the run; propagation conflicts
/// are ordinary control flow inside the search and never surface here.
/// Allocation failure is left to the runtime, which aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed DIMACS input.
    #[error("bad input - {0}")]
    BadInput(String),

    /// More variables than the packed literal encoding can address.
    #[error("too many vars ({num_vars})")]
    Overflow { num_vars: usize },

    /// The input file could not be read.
    #[error("cannot open file - {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn bad_input(msg: impl Into<String>) -> Error {
        Error::BadInput(msg.into())
    }
}

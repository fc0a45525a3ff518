use core::fmt::{self, Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The referenced question or choice does not exist.
    InvalidChoice,
    /// Submission was requested before every question was answered.
    IncompleteAttempt,
    /// The referenced poll option does not exist.
    UnknownOption,
    /// The caller could not be resolved to a stable identity.
    UnauthenticatedVoter,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidChoice => "That choice does not exist.",
            Self::IncompleteAttempt => "Every question must be answered before submitting.",
            Self::UnknownOption => "That option does not exist.",
            Self::UnauthenticatedVoter => "You must be signed in to do that.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;

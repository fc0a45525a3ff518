use core::fmt::{self, Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An engine transition rejected the request.
    Engine(engine::Error),
    /// The persistence collaborator failed or had no such entity.
    Store(store::Error),
    /// No attempt is in flight for this voter and quiz.
    NoAttempt,
}

impl From<engine::Error> for Error {
    fn from(err: engine::Error) -> Self {
        Self::Engine(err)
    }
}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Self {
        Self::Store(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => err.fmt(f),
            Self::Store(store::Error::AlreadyExists) => f.write_str("That resource already exists."),
            Self::Store(store::Error::BadInput) => f.write_str("Unacceptable input."),
            Self::Store(store::Error::NotFound) => f.write_str("Resource not found."),
            Self::Store(store::Error::Fatal) => {
                f.write_str("We encountered an unexpected storage error on our end.")
            }
            Self::NoAttempt => f.write_str("No attempt is in progress for this quiz."),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

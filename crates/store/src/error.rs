#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The entity we are trying to insert already exists.
    AlreadyExists,
    /// The entity failed validation.
    BadInput,
    /// No entity exists under the requested key.
    NotFound,
    /// Unrecoverable storage error.
    Fatal,
}

pub type Result<T> = core::result::Result<T, Error>;

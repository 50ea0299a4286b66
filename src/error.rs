use thiserror::Error;

/// Malformed input to a builder, parameter or value.
///
/// Everything here belongs to the invalid-argument family: it is raised at the
/// point of mutation, except [`Error::WhitespaceInKey`] which can only be seen
/// while encoding dynamic JSON during rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("alias must not be empty or whitespace")]
    BlankAlias,
    #[error("invalid variable name `{0}`: only letters and digits are allowed")]
    InvalidVariableName(String),
    #[error("invalid GraphQL type name `{0}`")]
    InvalidTypeName(String),
    #[error("JSON object keys used as GraphQL arguments must not contain whitespace; key: `{0}`")]
    WhitespaceInKey(String),
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("a variable declaration requires a named parameter")]
    UnnamedVariable,
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::BlankAlias
                | Error::InvalidVariableName(_)
                | Error::InvalidTypeName(_)
                | Error::WhitespaceInKey(_)
                | Error::EmptyFieldName
                | Error::UnnamedVariable
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

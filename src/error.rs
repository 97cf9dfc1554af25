use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcefError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),
}

use thiserror::Error;

/// Construction-time contract violations for an [`Order`](crate::orders::Order).
///
/// Every variant is an invalid argument supplied by the caller; none of them
/// are transient, so there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("invalid action `{0}`: expected `buy` or `sell`")]
    InvalidAction(String),

    #[error("invalid quantity {0}: must be >= 0")]
    NegativeQuantity(f64),

    #[error("invalid quantity {0}: must be a number")]
    InvalidQuantity(f64),

    #[error("invalid {0}: must not be empty")]
    EmptyToken(&'static str),

    #[error("invalid timestamp `{0}`: expected RFC 3339")]
    InvalidTimestamp(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

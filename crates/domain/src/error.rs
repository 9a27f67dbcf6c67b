use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("index {index} is out of range for a list of {len} images")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("image url must not be empty")]
    EmptyImageUrl,
}

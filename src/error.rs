//! Unified error type.

/// The error type returned by precis's fallible server operations.
///
/// Application-level errors (400, 404, 500 from the provider, etc.) are
/// expressed as HTTP [`Response`](crate::Response) values, not as `Error`s.
/// This type surfaces infrastructure failures: binding to a port or reading
/// the listener's address.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

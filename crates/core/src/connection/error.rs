use std::error::Error as StdError;

use thiserror::Error;

/// An error reported by the underlying database client.
///
/// The original error is kept as-is and reachable through [`std::error::Error::source`]
/// or [`ClientError::downcast_ref`]; nothing is retried or translated.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ClientError {
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl ClientError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the original error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }

    /// Unwraps the original error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_downcast() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = ClientError::new(io);

        assert_eq!(error.to_string(), "refused");
        assert_eq!(
            error.downcast_ref::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::ConnectionRefused)
        );
        assert!(error.source().is_some());

        let inner = error.into_inner();
        assert_eq!(
            inner.downcast::<std::io::Error>().map(|e| e.kind()).ok(),
            Some(std::io::ErrorKind::ConnectionRefused)
        );
    }

    #[test]
    fn test_from_message() {
        let error = ClientError::new("table already exists");
        assert_eq!(error.to_string(), "table already exists");
    }
}

use serenity::http::HttpError;
use thiserror::Error;

/// Failure of a call into the Discord API.
///
/// Carries the name of the operation that was attempted so log lines can be
/// traced back to the step of the interaction flow that failed. Calls are never
/// retried automatically.
#[derive(Error, Debug)]
pub enum PlatformCallError {
    /// The target message or interaction no longer exists.
    ///
    /// Expected when retiring a control message that somebody already deleted.
    #[error("{operation}: target not found")]
    NotFound {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// Any other Discord error.
    ///
    /// Boxed due to the size of `serenity::Error`.
    #[error("{operation} failed: {source}")]
    Discord {
        /// The operation that was attempted
        operation: &'static str,
        /// The underlying serenity error
        #[source]
        source: Box<serenity::Error>,
    },
}

impl PlatformCallError {
    /// Wraps a serenity error, classifying HTTP 404 answers as `NotFound`.
    ///
    /// # Arguments
    /// - `operation` - Short name of the attempted call, used in log output
    /// - `err` - Error returned by serenity
    ///
    /// # Returns
    /// - `PlatformCallError::NotFound` - Discord answered 404
    /// - `PlatformCallError::Discord` - Every other failure
    pub fn from_serenity(operation: &'static str, err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(ref response)) = err {
            if response.status_code.as_u16() == 404 {
                return Self::NotFound { operation };
            }
        }

        Self::Discord {
            operation,
            source: Box::new(err),
        }
    }

    /// Returns true when the failure means the target is already gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

//! Unified error type definition

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// How an invocation of the external tool failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// The process could not be started at all (missing binary, permissions, ...)
    Unavailable(String),
    /// The process ran but exited unsuccessfully
    Exited { code: Option<i32>, stderr: String },
    /// The call did not finish before its deadline
    TimedOut(Duration),
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "unavailable: {msg}"),
            Self::Exited { code: Some(code), stderr } if stderr.is_empty() => {
                write!(f, "exited with status {code}")
            }
            Self::Exited { code: Some(code), stderr } => {
                write!(f, "exited with status {code}: {stderr}")
            }
            Self::Exited { code: None, stderr } => write!(f, "terminated by signal: {stderr}"),
            Self::TimedOut(after) => write!(f, "timed out after {}ms", after.as_millis()),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// External process unavailable, non-zero exit or timeout
    #[error("`{command}` failed: {failure}")]
    RemoteExecution {
        command: String,
        failure: RemoteFailure,
    },

    /// Process exited cleanly but its output had an unexpected shape
    #[error("Cannot decode output of `{command}`: {message}")]
    Decode { command: String, message: String },

    /// An update/delete/prune/init action failed
    #[error("{action} failed: {source}")]
    Action {
        action: String,
        #[source]
        source: Box<CoreError>,
    },

    /// The operation is not defined for this kind of record
    #[error("{operation} is not supported for {kind}")]
    UnsupportedItemKind { operation: String, kind: String },

    /// User supplied value rejected before reaching the tool
    #[error("Invalid value for {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Entity noun with no registry entry
    #[error("Unsupported entity type: {0}")]
    UnknownEntity(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Shortcut for a timed out call.
    pub fn timed_out(command: impl Into<String>, after: Duration) -> Self {
        Self::RemoteExecution {
            command: command.into(),
            failure: RemoteFailure::TimedOut(after),
        }
    }

    /// Wrap an error as the failure of a named action.
    #[must_use]
    pub fn into_action(self, action: impl Into<String>) -> Self {
        match self {
            // Already classified, keep it flat
            err @ (Self::Action { .. }
            | Self::UnsupportedItemKind { .. }
            | Self::InvalidInput { .. }) => err,
            other => Self::Action {
                action: action.into(),
                source: Box::new(other),
            },
        }
    }

    /// Whether the call hit its deadline.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::RemoteExecution {
                failure: RemoteFailure::TimedOut(_),
                ..
            } => true,
            Self::Action { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Whether it is expected behavior (user input, unsupported operation, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnsupportedItemKind { .. } | Self::InvalidInput { .. } | Self::UnknownEntity(_) => {
                true
            }
            Self::RemoteExecution { failure, .. } => {
                matches!(failure, RemoteFailure::Exited { .. } | RemoteFailure::TimedOut(_))
            }
            Self::Action { source, .. } => source.is_expected(),
            Self::Decode { .. } | Self::Config(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_action_wraps_remote_failures_once() {
        let err = CoreError::timed_out("job delete", Duration::from_secs(2)).into_action("Delete job");
        assert!(matches!(err, CoreError::Action { .. }));
        assert!(err.is_timeout());

        let again = err.into_action("outer");
        match again {
            CoreError::Action { action, .. } => assert_eq!(action, "Delete job"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unsupported_kind_is_not_wrapped() {
        let err = CoreError::UnsupportedItemKind {
            operation: "Delete".to_string(),
            kind: "queue".to_string(),
        }
        .into_action("Delete queue entry");
        assert!(matches!(err, CoreError::UnsupportedItemKind { .. }));
        assert!(err.is_expected());
    }

    #[test]
    fn remote_failure_display() {
        let exited = RemoteFailure::Exited {
            code: Some(2),
            stderr: "no such table".to_string(),
        };
        assert_eq!(exited.to_string(), "exited with status 2: no such table");
        assert_eq!(
            RemoteFailure::TimedOut(Duration::from_millis(1500)).to_string(),
            "timed out after 1500ms"
        );
    }

    #[test]
    fn decode_errors_are_unexpected() {
        let err = CoreError::Decode {
            command: "job list".to_string(),
            message: "expected array".to_string(),
        };
        assert!(!err.is_expected());
        assert!(!err.is_timeout());
    }
}

//! error types for startup, scripts and menu operations

use thiserror::Error;

use crate::config::ConfigError;

/// failure while running one of the bundled sql scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("resource {0} could not be loaded")]
    MissingResource(String),

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),

    #[error("table {table} does not match the expected layout")]
    Layout { table: String },
}

#[derive(Debug, Error)]
pub enum Error {
    /// linked sqlite library unusable
    #[error("Database engine unavailable: {0}")]
    Driver(String),

    #[error("Could not connect to the database ({target}): {reason}")]
    Connection { target: String, reason: String },

    #[error("Problem creating the database structure: {0}")]
    Schema(#[source] ScriptError),

    #[error("Problem inserting seed data into the database: {0}")]
    Seed(#[source] ScriptError),

    /// a single menu operation failed; never fatal
    #[error("Problem {action}: {source}")]
    Operation {
        action: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Problem closing the database: {0}")]
    Close(#[source] rusqlite::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn operation_error_is_one_line()
    {
        let err = Error::Operation {
            action: "modifying activity 1001".to_string(),
            source: rusqlite::Error::InvalidQuery,
        };
        let msg = err.to_string();

        assert!(msg.starts_with("Problem modifying activity 1001"));
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn script_errors_keep_their_cause()
    {
        let err = Error::Schema(ScriptError::MissingResource("/resources/x.sql".into()));
        assert!(err.to_string().contains("/resources/x.sql"));
    }
}

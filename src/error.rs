//! All error types for the locvalue crate.
//!
//! These are returned from all fallible operations (encoding, decoding,
//! persistence).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// An argument holds an opaque object reference, which has no portable
    /// serialized representation.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A serialized placeholder carried a format specifier outside the
    /// closed token table. Treated as data corruption.
    #[error("malformed format specifier `{0}`")]
    MalformedSpecifier(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unsupported_value_error() {
        let error = Error::UnsupportedValue("opaque object".to_string());
        assert_eq!(error.to_string(), "unsupported value: opaque object");
    }

    #[test]
    fn test_malformed_specifier_error() {
        let error = Error::MalformedSpecifier("%q".to_string());
        assert_eq!(error.to_string(), "malformed format specifier `%q`");
    }

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("parse error"));
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::MalformedSpecifier("%x".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("MalformedSpecifier"));
        assert!(debug.contains("%x"));
    }
}

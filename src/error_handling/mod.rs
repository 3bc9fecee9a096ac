//! Error handling.
//!
//! Error types are categorized into:
//! - **No data**: an empty answer, rendered as an empty list
//! - **Query failures**: scoped to one record type, name server or tool, folded into the report
//! - **Fatal**: initialization, validation and report-write errors that stop the run

mod types;

// Re-export public API
pub use types::{
    ConfigValidationError, ExternalQueryError, InitializationError, LookupError, TransferError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_lookup_error_no_data_detection() {
        assert!(LookupError::NoData.is_no_data());
        assert!(!LookupError::Query("timed out".into()).is_no_data());
    }

    #[test]
    fn test_lookup_error_query_displays_reason_verbatim() {
        let err = LookupError::Query("request timed out".to_string());
        assert_eq!(err.to_string(), "request timed out");
    }

    #[test]
    fn test_transfer_error_messages_are_descriptive() {
        assert_eq!(
            TransferError::Refused("REFUSED".into()).to_string(),
            "server responded with REFUSED"
        );
        assert_eq!(
            TransferError::Timeout(Duration::from_secs(5)).to_string(),
            "timed out after 5s"
        );
        assert!(TransferError::Incomplete(3).to_string().contains("3 records"));
        let resolve = TransferError::Resolve {
            server: "ns1.example.com".into(),
            reason: "no records found".into(),
        };
        assert!(resolve.to_string().contains("ns1.example.com"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = ConfigValidationError::new("domain", "domain must not be empty");
        assert_eq!(err.to_string(), "invalid domain: domain must not be empty");
    }

    #[test]
    fn test_external_query_error_names_program() {
        let err = ExternalQueryError::ExitStatus {
            program: "dig".into(),
            status: "exit status: 9".into(),
        };
        assert_eq!(err.to_string(), "dig exited with exit status: 9");
    }
}

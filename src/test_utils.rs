#[cfg(test)]
pub mod fixtures {
    /// A reply that follows the requested quiz layout exactly.
    pub fn well_formed_reply() -> String {
        "Question: What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\nAnswer: B\nExplanation: Basic arithmetic."
            .to_string()
    }

    /// A reply that ignores the layout altogether.
    pub fn rambling_reply() -> String {
        "Some rambling text with no structure.".to_string()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::quiz_parser::parse_quiz_reply;

    #[test]
    fn test_fixtures_cover_both_reply_shapes() {
        assert!(parse_quiz_reply(&well_formed_reply()).is_well_formed);
        assert!(!parse_quiz_reply(&rambling_reply()).is_well_formed);
    }
}

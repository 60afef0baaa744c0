use serde::Serialize;

/// The only body shape returned on a failure path.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: i64,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            message: message.into(),
        }
    }
}

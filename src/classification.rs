//! Classification result returned to UI callers
//!
//! Every classification call produces exactly one [`ClassificationResult`]:
//! either `Success` with a content descriptor or `Failure` with an error
//! message. Callers branch on [`ClassificationResult::succeeded`] and treat a
//! failure as "no usable color information".

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Unexpected internal failure during sampling or decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ProcessingFault: {0}")]
pub struct ProcessingFault(pub String);

/// Outcome of classifying one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", from = "ResultRepr")]
pub enum ClassificationResult {
    /// Frame was processed; `content` describes what was found
    Success {
        /// Detected content descriptor
        content: String,
    },
    /// Frame could not be classified
    Failure {
        /// Why classification failed (never empty)
        error_message: String,
    },
}

/// Wire form of [`ClassificationResult`]; deserialized values go through the
/// constructors so a failure never arrives with an empty message
#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ResultRepr {
    Success { content: String },
    Failure { error_message: String },
}

impl From<ResultRepr> for ClassificationResult {
    fn from(repr: ResultRepr) -> Self {
        match repr {
            ResultRepr::Success { content } => Self::success(content),
            ResultRepr::Failure { error_message } => Self::failure(error_message),
        }
    }
}

impl ClassificationResult {
    /// Build a successful result
    pub fn success(content: impl Into<String>) -> Self {
        Self::Success {
            content: content.into(),
        }
    }

    /// Build a failed result
    ///
    /// An empty message is replaced so a failure is never silent.
    pub fn failure(error_message: impl Into<String>) -> Self {
        let mut error_message = error_message.into();
        if error_message.is_empty() {
            error_message = "unknown error".to_string();
        }
        Self::Failure { error_message }
    }

    /// Map a typed outcome onto a result, using `Display` for both sides
    pub fn from_outcome<T: fmt::Display, E: fmt::Display>(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(content) => Self::success(content.to_string()),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    /// Whether classification succeeded
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Content descriptor, empty when failed
    pub fn content(&self) -> &str {
        match self {
            Self::Success { content } => content,
            Self::Failure { .. } => "",
        }
    }

    /// Error message, empty when succeeded
    pub fn error_message(&self) -> &str {
        match self {
            Self::Success { .. } => "",
            Self::Failure { error_message } => error_message,
        }
    }

    /// Serialize for a UI bridge
    ///
    /// The JSON carries `status`, `content` and `error_message` so hosts that
    /// expect the flat triple can read it without knowing the variant.
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&serde_json::json!({
            "status": if self.succeeded() { "success" } else { "failure" },
            "succeeded": self.succeeded(),
            "content": self.content(),
            "error_message": self.error_message(),
        }))
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { content } => write!(f, "Content: {}", content),
            Self::Failure { error_message } => write!(f, "Error: {}", error_message),
        }
    }
}

/// Run a classification step, converting any panic into a failed result
///
/// Callers are typically render or UI threads that cannot recover from an
/// unwinding panic, so nothing may escape this boundary.
pub(crate) fn guard<F>(operation: &str, f: F) -> ClassificationResult
where
    F: FnOnce() -> ClassificationResult,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let fault = ProcessingFault(format!("{} panicked: {}", operation, panic_message(&*payload)));
            log::error!("{}", fault);
            ClassificationResult::failure(fault.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

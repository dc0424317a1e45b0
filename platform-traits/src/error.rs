use thiserror::Error;

/// Failure produced while executing an adapted call.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Call was dropped before a response was delivered")]
    Canceled,
}

/// Failure produced while converting a raw response body.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Response body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure raised by the default-method lookup and bind machinery itself.
///
/// These are distinct from failures raised by an invoked method body, which
/// pass through to the caller untouched as [`DynError`] values.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Default method invocation is not supported on this runtime: {0}")]
    Unsupported(String),

    #[error("Interface `{interface}` declares no default body named `{method}`")]
    NoSuchMethod { interface: String, method: String },

    #[error("Lookup lacks access to restricted interface `{0}`")]
    AccessDenied(String),
}

/// Boxed error used where a caller-raised failure must cross the invocation
/// boundary verbatim. The original error value stays recoverable by downcast.
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

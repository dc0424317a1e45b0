//! # Platform Capability Contracts
//!
//! Contracts between the restkit client core and the host runtime it executes
//! in. The platform strategy resolved at process startup implements these
//! contracts; the (out-of-scope) client builder consumes them:
//!
//! - [`CallbackExecutor`](executor::CallbackExecutor) - Callback delivery target
//! - [`CallAdapterFactory`](call::CallAdapterFactory) - Return-shape adaptation
//! - [`ConverterFactory`](call::ConverterFactory) - Response body conversion
//! - [`Interface`](method::Interface) / [`Method`](method::Method) - Descriptor
//!   model for default-method invocation
//!
//! ## Error Handling
//!
//! Machinery failures use the typed errors in [`error`]; failures raised by an
//! invoked default body travel as [`DynError`](error::DynError) so the caller
//! observes the original error value, never a wrapper.

pub mod call;
pub mod error;
pub mod executor;
pub mod method;

pub use call::{
    AdaptedCall, Call, CallAdapter, CallAdapterFactory, CallCallback, ConverterFactory,
    RawResponse, ResponseConverter, ReturnKind,
};
pub use error::{CallError, ConvertError, DynError, InvokeError};
pub use executor::CallbackExecutor;
pub use method::{Interface, Method, MethodBody, Receiver, Visibility};

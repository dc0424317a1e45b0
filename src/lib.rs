//! # restkit
//!
//! Facade over the restkit platform layer: runtime capability detection and
//! dispatch for the HTTP client core. Host applications depend on this crate
//! for the resolved [`Platform`] strategy, the main-thread executor, and
//! logging bootstrap; the individual workspace crates stay an implementation
//! detail.
//!
//! ```no_run
//! use restkit::Platform;
//!
//! let strategy = Platform::get();
//! let executor = strategy.default_callback_executor();
//! let adapters = strategy.default_call_adapter_factories(executor);
//! assert!(!adapters.is_empty());
//! ```

pub mod logging;

pub use platform_core::{
    detect, detect_profile, main_handle, LookupProbe, LookupSupport, MainLoop, MainLoopHandle,
    MainThreadExecutor, Platform, PlatformStrategy, RuntimeProfile, RuntimeVariant,
    StrategyVariant,
};
pub use platform_traits::{
    AdaptedCall, Call, CallAdapter, CallAdapterFactory, CallError, CallbackExecutor,
    ConvertError, ConverterFactory, DynError, Interface, InvokeError, Method, MethodBody,
    RawResponse, Receiver, ResponseConverter, ReturnKind, Visibility,
};

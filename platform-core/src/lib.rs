//! # Platform Detection & Capability Dispatch
//!
//! Runtime capability layer of the restkit client core. At process startup
//! the [`signature`] module classifies the hosting runtime from a single
//! environment property; [`Platform::get`] constructs the matching
//! [`PlatformStrategy`] exactly once and caches it for the process lifetime.
//!
//! The strategy governs three things:
//!
//! - which default call adapter and converter factories the client builder
//!   registers ([`adapters`]);
//! - how callback results travel back to caller code
//!   ([`main_thread::MainThreadExecutor`] on Android, the caller's own thread
//!   elsewhere);
//! - how interface default bodies are invoked past normal visibility rules
//!   ([`lookup`]), with runtime-version-dependent fallbacks.
//!
//! Detection failures degrade silently to the standard strategy so the client
//! stays usable in sandboxed hosts; invocation-path failures always surface.

pub mod adapters;
pub mod lookup;
pub mod main_thread;
pub mod platform;
pub mod signature;
pub mod strategy;

pub use adapters::{
    CallbackCallAdapterFactory, CompletionCallAdapterFactory, OptionConverterFactory,
};
pub use lookup::{LookupProbe, MethodLookup, PlainLookup, PrivilegedLookup};
pub use main_thread::{main_handle, MainLoop, MainLoopHandle, MainThreadExecutor};
pub use platform::Platform;
pub use signature::{detect, detect_profile, LookupSupport, RuntimeProfile, RuntimeVariant};
pub use strategy::{PlatformStrategy, StrategyVariant};

//! Platform strategy: the per-runtime capability contract.
//!
//! One strategy is constructed per process and never mutated afterwards, so
//! concurrent readers need no locking. Variant-specific behavior is a closed
//! tagged enum rather than an open inheritance seam: the variant set is
//! exhaustive and every dispatch is a pattern match.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use platform_traits::{
    CallAdapterFactory, CallbackExecutor, ConverterFactory, DynError, Interface, InvokeError,
    Method, Receiver,
};

use crate::adapters::{
    CallbackCallAdapterFactory, CompletionCallAdapterFactory, OptionConverterFactory,
};
use crate::lookup::{LookupProbe, MethodLookup, PlainLookup, PrivilegedLookup};
use crate::main_thread::MainThreadExecutor;
use crate::signature::{
    RuntimeProfile, RuntimeVariant, ANDROID_EXTENDED_TYPES_API, ANDROID_PRIVILEGED_LOOKUP_API,
};

/// Which runtime variant a strategy serves, plus variant-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyVariant {
    Standard,
    Android { api_level: u32 },
}

/// Immutable capability contract for one runtime variant.
pub struct PlatformStrategy {
    variant: StrategyVariant,
    has_extended_types: bool,
    lookup: Arc<dyn MethodLookup>,
    probe: LookupProbe,
}

impl PlatformStrategy {
    /// Strategy for a standard host runtime.
    pub fn standard() -> Self {
        Self::from_profile(&RuntimeProfile::standard(0))
    }

    /// Strategy for an Android host at the given API level.
    pub fn android(api_level: u32) -> Self {
        Self::from_profile(&RuntimeProfile::android(api_level))
    }

    /// Build the strategy matching a detected runtime profile.
    pub fn from_profile(profile: &RuntimeProfile) -> Self {
        let (variant, has_extended_types) = match profile.variant {
            RuntimeVariant::Standard => (StrategyVariant::Standard, true),
            RuntimeVariant::Android => (
                StrategyVariant::Android {
                    api_level: profile.vm_version,
                },
                profile.vm_version >= ANDROID_EXTENDED_TYPES_API,
            ),
        };

        // Without the extended types no default bodies can be declared, so
        // the privileged probe is never worth running.
        let probe = if has_extended_types {
            PrivilegedLookup::probe(profile.lookup_support())
        } else {
            LookupProbe::AbsentMissing
        };

        let lookup: Arc<dyn MethodLookup> = match probe {
            LookupProbe::Available(handle) => Arc::new(handle),
            LookupProbe::AbsentModern => Arc::new(PlainLookup::new(true)),
            LookupProbe::AbsentMissing => Arc::new(PlainLookup::new(false)),
        };

        debug!(?variant, has_extended_types, ?probe, "Constructed platform strategy");

        Self {
            variant,
            has_extended_types,
            lookup,
            probe,
        }
    }

    pub fn variant(&self) -> StrategyVariant {
        self.variant
    }

    /// Whether the host natively supports the extended asynchronous and
    /// optional result types.
    pub fn has_extended_types(&self) -> bool {
        self.has_extended_types
    }

    /// Outcome of the one-time privileged lookup probe.
    pub fn lookup_probe(&self) -> LookupProbe {
        self.probe
    }

    /// Default callback delivery target for this runtime.
    ///
    /// Standard hosts deliver callbacks on the completing thread; Android
    /// always gets a main-thread executor, even below the API level that
    /// ships the extended types.
    pub fn default_callback_executor(&self) -> Option<Arc<dyn CallbackExecutor>> {
        match self.variant {
            StrategyVariant::Standard => None,
            StrategyVariant::Android { .. } => Some(Arc::new(MainThreadExecutor::new())),
        }
    }

    /// Ordered default call adapter factories; earlier entries win.
    pub fn default_call_adapter_factories(
        &self,
        callback_executor: Option<Arc<dyn CallbackExecutor>>,
    ) -> Vec<Arc<dyn CallAdapterFactory>> {
        let executor_factory: Arc<dyn CallAdapterFactory> =
            Arc::new(CallbackCallAdapterFactory::new(callback_executor));
        if self.has_extended_types {
            vec![Arc::new(CompletionCallAdapterFactory), executor_factory]
        } else {
            vec![executor_factory]
        }
    }

    pub fn default_call_adapter_factories_len(&self) -> usize {
        if self.has_extended_types {
            2
        } else {
            1
        }
    }

    /// Ordered default converter factories.
    pub fn default_converter_factories(&self) -> Vec<Arc<dyn ConverterFactory>> {
        if self.has_extended_types {
            vec![Arc::new(OptionConverterFactory)]
        } else {
            Vec::new()
        }
    }

    pub fn default_converter_factories_len(&self) -> usize {
        if self.has_extended_types {
            1
        } else {
            0
        }
    }

    /// Whether `method` should be dispatched as a default method.
    pub fn is_default_method(&self, method: &Method) -> bool {
        self.has_extended_types && method.has_body()
    }

    /// Invoke the default body `method` declares on `declaring`, bound to
    /// `receiver`, with `args`.
    ///
    /// Runs inline on the calling thread. Lookup and bind failures surface as
    /// [`InvokeError`] (downcastable from the returned box); a failure raised
    /// by the body itself passes through unchanged.
    pub fn invoke_default_method(
        &self,
        method: &Method,
        declaring: &Interface,
        receiver: Receiver,
        args: &[Value],
    ) -> Result<Value, DynError> {
        if let StrategyVariant::Android { api_level } = self.variant {
            // API 24 and 25 ship the extended types without a safe privileged
            // lookup path; fail fast before touching the lookup at all.
            if api_level < ANDROID_PRIVILEGED_LOOKUP_API {
                return Err(Box::new(InvokeError::Unsupported(format!(
                    "calling default methods on API {api_level} is not supported"
                ))));
            }
        }

        let handle = self
            .lookup
            .find_special(declaring, method.name())
            .map_err(|err| Box::new(err) as DynError)?;
        handle.bind_to(receiver).invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_traits::Visibility;
    use serde_json::json;

    fn default_method(name: &str) -> Method {
        Method::default_method(name, Arc::new(|_, args| Ok(json!({ "echo": args }))))
    }

    fn service_interface() -> Interface {
        Interface::new("CatalogService", Visibility::Public)
            .with_method(Method::abstract_method("list"))
            .with_method(default_method("list_or_empty"))
    }

    #[test]
    fn test_standard_strategy_capabilities() {
        let strategy = PlatformStrategy::standard();
        assert_eq!(strategy.variant(), StrategyVariant::Standard);
        assert!(strategy.has_extended_types());
        assert!(strategy.default_callback_executor().is_none());
    }

    #[test]
    fn test_android_extended_types_by_api_level() {
        assert!(!PlatformStrategy::android(23).has_extended_types());
        assert!(PlatformStrategy::android(24).has_extended_types());
        assert!(PlatformStrategy::android(26).has_extended_types());
    }

    #[test]
    fn test_android_always_has_callback_executor() {
        assert!(PlatformStrategy::android(21)
            .default_callback_executor()
            .is_some());
        assert!(PlatformStrategy::android(33)
            .default_callback_executor()
            .is_some());
    }

    #[test]
    fn test_adapter_factory_order_with_extended_types() {
        let strategy = PlatformStrategy::standard();
        let factories = strategy.default_call_adapter_factories(None);
        assert_eq!(factories.len(), 2);
        assert_eq!(factories.len(), strategy.default_call_adapter_factories_len());
        assert_eq!(factories[0].name(), "completion");
        assert_eq!(factories[1].name(), "callback");
    }

    #[test]
    fn test_adapter_factories_without_extended_types() {
        let strategy = PlatformStrategy::android(23);
        let factories = strategy.default_call_adapter_factories(None);
        assert_eq!(factories.len(), 1);
        assert_eq!(factories.len(), strategy.default_call_adapter_factories_len());
        assert_eq!(factories[0].name(), "callback");
    }

    #[test]
    fn test_converter_factories_follow_extended_types() {
        let standard = PlatformStrategy::standard();
        assert_eq!(standard.default_converter_factories().len(), 1);
        assert_eq!(standard.default_converter_factories_len(), 1);

        let legacy = PlatformStrategy::android(23);
        assert!(legacy.default_converter_factories().is_empty());
        assert_eq!(legacy.default_converter_factories_len(), 0);
    }

    #[test]
    fn test_is_default_method() {
        let strategy = PlatformStrategy::standard();
        assert!(strategy.is_default_method(&default_method("m")));
        assert!(!strategy.is_default_method(&Method::abstract_method("m")));

        let legacy = PlatformStrategy::android(23);
        assert!(!legacy.is_default_method(&default_method("m")));
    }

    #[test]
    fn test_invoke_fails_fast_below_api_26() {
        let strategy = PlatformStrategy::android(25);
        let iface = service_interface();
        let method = iface.method("list_or_empty").unwrap().clone();

        let err = strategy
            .invoke_default_method(&method, &iface, Arc::new(()), &[])
            .unwrap_err();
        let invoke_err = err.downcast_ref::<InvokeError>().expect("typed error");
        assert!(matches!(invoke_err, InvokeError::Unsupported(_)));
    }

    #[test]
    fn test_invoke_delegates_on_api_26() {
        let strategy = PlatformStrategy::android(26);
        let iface = service_interface();
        let method = iface.method("list_or_empty").unwrap().clone();

        let value = strategy
            .invoke_default_method(&method, &iface, Arc::new(()), &[json!(5)])
            .unwrap();
        assert_eq!(value, json!({ "echo": [5] }));
    }

    #[test]
    fn test_invoke_passes_body_error_through() {
        #[derive(Debug)]
        struct QuotaExceeded;

        impl std::fmt::Display for QuotaExceeded {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "quota exceeded")
            }
        }

        impl std::error::Error for QuotaExceeded {}

        let iface = Interface::new("QuotaService", Visibility::Public).with_method(
            Method::default_method(
                "check",
                Arc::new(|_, _| Err(Box::new(QuotaExceeded) as DynError)),
            ),
        );
        let method = iface.method("check").unwrap().clone();

        let err = PlatformStrategy::standard()
            .invoke_default_method(&method, &iface, Arc::new(()), &[])
            .unwrap_err();
        assert!(err.downcast_ref::<QuotaExceeded>().is_some());
        assert!(err.downcast_ref::<InvokeError>().is_none());
    }

    #[test]
    fn test_probe_selected_once_at_construction() {
        assert!(matches!(
            PlatformStrategy::standard().lookup_probe(),
            LookupProbe::Available(_)
        ));
        assert_eq!(
            PlatformStrategy::android(25).lookup_probe(),
            LookupProbe::AbsentMissing
        );
        assert_eq!(
            PlatformStrategy::from_profile(&RuntimeProfile::standard(17)).lookup_probe(),
            LookupProbe::AbsentModern
        );
    }
}

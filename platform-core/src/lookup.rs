//! Default-method lookup machinery.
//!
//! Resolving a default body through its declaring interface must bypass any
//! override on the concrete service, and - on runtimes that allow it - normal
//! visibility rules as well. Two lookups implement the same [`MethodLookup`]
//! seam: the privileged one ignores visibility entirely, the plain one is
//! bound by whatever access the host runtime grants it. Which one a strategy
//! carries is decided once, at construction, by [`PrivilegedLookup::probe`].

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use platform_traits::{DynError, Interface, InvokeError, MethodBody, Receiver, Visibility};

use crate::signature::LookupSupport;

/// Outcome of the one-time privileged lookup probe.
///
/// Both absent cases are silent and non-fatal; they are kept apart only to
/// decide how much access the plain-lookup fallback gets at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupProbe {
    /// The trusted constructor is reachable; privileged invocation works.
    Available(PrivilegedLookup),
    /// The privileged lookup type predates this runtime. Invoking a default
    /// body on a restricted interface will fail fast later, which is
    /// acceptable: the surrounding language feature is absent there too.
    AbsentMissing,
    /// The runtime fixed its visibility rules, so a plain lookup suffices and
    /// the trusted constructor no longer exists.
    AbsentModern,
}

/// Visibility-bypassing lookup capability.
///
/// An opaque token: holding one proves the trusted constructor was reachable
/// when the owning strategy was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegedLookup;

impl PrivilegedLookup {
    /// Attempt to acquire the privileged lookup for the given runtime grant.
    ///
    /// Never fails: unavailability is data, not an error, and callers branch
    /// on the returned probe instead of re-deriving absence later.
    pub fn probe(support: LookupSupport) -> LookupProbe {
        match support {
            LookupSupport::Trusted => LookupProbe::Available(PrivilegedLookup),
            LookupSupport::Missing => {
                debug!("Privileged lookup type missing on this runtime; using plain lookup");
                LookupProbe::AbsentMissing
            }
            LookupSupport::PublicOnly => {
                debug!("Runtime grants plain lookups full access; trusted constructor absent");
                LookupProbe::AbsentModern
            }
        }
    }
}

/// The host's ordinary lookup.
#[derive(Debug, Clone, Copy)]
pub struct PlainLookup {
    /// Modern runtimes let a plain lookup see restricted interfaces too.
    full_access: bool,
}

impl PlainLookup {
    pub fn new(full_access: bool) -> Self {
        Self { full_access }
    }
}

/// Resolution seam selected once at strategy construction.
pub trait MethodLookup: Send + Sync {
    /// Resolve the interface's own default body for `name`, ignoring any
    /// override a concrete service might carry.
    fn find_special(&self, interface: &Interface, name: &str) -> Result<MethodHandle, InvokeError>;
}

fn resolve(interface: &Interface, name: &str) -> Result<MethodHandle, InvokeError> {
    match interface.method(name).and_then(|m| m.body()) {
        Some(body) => Ok(MethodHandle {
            body: Arc::clone(body),
        }),
        None => Err(InvokeError::NoSuchMethod {
            interface: interface.name().to_string(),
            method: name.to_string(),
        }),
    }
}

impl MethodLookup for PrivilegedLookup {
    fn find_special(&self, interface: &Interface, name: &str) -> Result<MethodHandle, InvokeError> {
        resolve(interface, name)
    }
}

impl MethodLookup for PlainLookup {
    fn find_special(&self, interface: &Interface, name: &str) -> Result<MethodHandle, InvokeError> {
        if !self.full_access && interface.visibility() == Visibility::Restricted {
            return Err(InvokeError::AccessDenied(interface.name().to_string()));
        }
        resolve(interface, name)
    }
}

/// A resolved default body, scoped to its declaring interface.
pub struct MethodHandle {
    body: MethodBody,
}

impl std::fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodHandle").finish_non_exhaustive()
    }
}

impl MethodHandle {
    /// Bind the handle to a service instance.
    pub fn bind_to(self, receiver: Receiver) -> BoundHandle {
        BoundHandle {
            body: self.body,
            receiver,
        }
    }
}

/// A default body bound to its receiver, ready to invoke.
pub struct BoundHandle {
    body: MethodBody,
    receiver: Receiver,
}

impl BoundHandle {
    /// Invoke the bound body on the calling thread.
    ///
    /// A failure returned here was raised by the body itself and passes
    /// through verbatim.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, DynError> {
        (self.body)(&self.receiver, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_traits::Method;
    use serde_json::json;

    fn restricted_interface() -> Interface {
        Interface::new("InternalService", Visibility::Restricted).with_method(
            Method::default_method(
                "echo",
                Arc::new(|_, args| Ok(args.first().cloned().unwrap_or(Value::Null))),
            ),
        )
    }

    #[test]
    fn test_probe_outcomes() {
        assert_eq!(
            PrivilegedLookup::probe(LookupSupport::Trusted),
            LookupProbe::Available(PrivilegedLookup)
        );
        assert_eq!(
            PrivilegedLookup::probe(LookupSupport::Missing),
            LookupProbe::AbsentMissing
        );
        assert_eq!(
            PrivilegedLookup::probe(LookupSupport::PublicOnly),
            LookupProbe::AbsentModern
        );
    }

    #[test]
    fn test_privileged_lookup_bypasses_visibility() {
        let iface = restricted_interface();
        let handle = PrivilegedLookup.find_special(&iface, "echo").unwrap();
        let receiver: Receiver = Arc::new(());
        let result = handle.bind_to(receiver).invoke(&[json!("hello")]).unwrap();
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_plain_lookup_denied_on_restricted_interface() {
        let iface = restricted_interface();
        let err = PlainLookup::new(false)
            .find_special(&iface, "echo")
            .unwrap_err();
        assert!(matches!(err, InvokeError::AccessDenied(name) if name == "InternalService"));
    }

    #[test]
    fn test_plain_lookup_with_full_access_resolves_restricted() {
        let iface = restricted_interface();
        assert!(PlainLookup::new(true).find_special(&iface, "echo").is_ok());
    }

    #[test]
    fn test_missing_or_abstract_method_is_no_such_method() {
        let iface = Interface::new("TrackService", Visibility::Public)
            .with_method(Method::abstract_method("fetch"));

        let err = PrivilegedLookup.find_special(&iface, "fetch").unwrap_err();
        assert!(matches!(err, InvokeError::NoSuchMethod { .. }));

        let err = PrivilegedLookup.find_special(&iface, "absent").unwrap_err();
        assert!(matches!(err, InvokeError::NoSuchMethod { .. }));
    }

    #[test]
    fn test_bound_handle_passes_body_error_through() {
        #[derive(Debug)]
        struct Dummy;

        impl std::fmt::Display for Dummy {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "dummy failure")
            }
        }

        impl std::error::Error for Dummy {}

        let iface = Interface::new("Svc", Visibility::Public).with_method(Method::default_method(
            "boom",
            Arc::new(|_, _| Err(Box::new(Dummy) as DynError)),
        ));

        let handle = PrivilegedLookup.find_special(&iface, "boom").unwrap();
        let err = handle
            .bind_to(Arc::new(()) as Receiver)
            .invoke(&[])
            .unwrap_err();
        assert!(err.downcast_ref::<Dummy>().is_some());
    }
}

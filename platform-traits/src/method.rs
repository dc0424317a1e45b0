//! Service interface and method descriptors.
//!
//! The dynamic dispatch layer that turns interface methods into HTTP requests
//! lives outside this workspace, but default-method invocation needs its data
//! model: an interface owns a table of methods, and a method may carry an
//! executable body (a *default method*) invocable without an implementing
//! override.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DynError;

/// Service instance a default body is bound to before invocation.
pub type Receiver = Arc<dyn Any + Send + Sync>;

/// Executable body of a default method.
///
/// Arguments and results use [`serde_json::Value`] as the dynamic value type
/// crossing the invocation seam. A failure raised here belongs to the body,
/// not to the invocation machinery, and must reach the caller unchanged.
pub type MethodBody =
    Arc<dyn Fn(&Receiver, &[Value]) -> Result<Value, DynError> + Send + Sync>;

/// Access level of an interface or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable through an ordinary lookup.
    Public,
    /// Only reachable through a visibility-bypassing lookup.
    Restricted,
}

/// A single declared method of a service interface.
///
/// Access to a default body is gated by the declaring interface's
/// visibility, not per method, so none is carried here.
#[derive(Clone)]
pub struct Method {
    name: String,
    body: Option<MethodBody>,
}

impl Method {
    /// Declare a method without a body.
    pub fn abstract_method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
        }
    }

    /// Declare a default method carrying an executable body.
    pub fn default_method(name: impl Into<String>, body: MethodBody) -> Self {
        Self {
            name: name.into(),
            body: Some(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this method carries a body (is not abstract).
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn body(&self) -> Option<&MethodBody> {
        self.body.as_ref()
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("has_body", &self.has_body())
            .finish()
    }
}

/// A service interface and its declared method table.
///
/// The table is authoritative for "special" resolution: resolving a default
/// body through the declaring interface always yields the interface's own
/// body, never an override on the concrete service.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    visibility: Visibility,
    methods: Vec<Method>,
}

impl Interface {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            methods: Vec::new(),
        }
    }

    /// Add a declared method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Look up a declared method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name() == name)
    }
}

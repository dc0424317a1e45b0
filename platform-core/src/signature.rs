//! Runtime capability signature.
//!
//! Classifies the host runtime from a single environment property so the rest
//! of the client never needs environment-specific builds. Detection is
//! side-effect free, deterministic for a given process, and degrades to
//! [`RuntimeVariant::Standard`] whenever the property is unreadable: a
//! sandboxed or stripped-down host must still get a usable client.

use tracing::debug;

/// Environment property naming the hosting runtime implementation.
pub const VM_NAME_VAR: &str = "RESTKIT_VM_NAME";

/// Environment property carrying the runtime generation: the API level on
/// Android, the host runtime major version elsewhere.
pub const VM_VERSION_VAR: &str = "RESTKIT_VM_VERSION";

/// Fixed runtime name advertised by Android hosts.
pub const ANDROID_VM_NAME: &str = "android";

/// First Android API level shipping the extended result types.
pub const ANDROID_EXTENDED_TYPES_API: u32 = 24;

/// First Android API level where the privileged lookup type exists.
pub const ANDROID_PRIVILEGED_LOOKUP_API: u32 = 26;

/// First standard-runtime generation whose plain lookup already has full
/// access, making the privileged constructor unnecessary (and unavailable).
pub const PUBLIC_LOOKUP_VERSION: u32 = 14;

/// Closed set of runtime variants the client adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeVariant {
    Standard,
    Android,
}

/// How much access the host runtime grants reflection-style lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSupport {
    /// The privileged lookup type exists and its trusted constructor is
    /// reachable.
    Trusted,
    /// The trusted constructor is gone; an ordinary lookup already sees
    /// everything it needs.
    PublicOnly,
    /// The privileged lookup type predates this runtime entirely.
    Missing,
}

/// Process-level fingerprint handed to strategy construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeProfile {
    pub variant: RuntimeVariant,
    pub vm_version: u32,
}

impl RuntimeProfile {
    pub fn standard(vm_version: u32) -> Self {
        Self {
            variant: RuntimeVariant::Standard,
            vm_version,
        }
    }

    pub fn android(api_level: u32) -> Self {
        Self {
            variant: RuntimeVariant::Android,
            vm_version: api_level,
        }
    }

    /// Lookup access granted by this runtime generation.
    pub fn lookup_support(&self) -> LookupSupport {
        match self.variant {
            RuntimeVariant::Android if self.vm_version < ANDROID_PRIVILEGED_LOOKUP_API => {
                LookupSupport::Missing
            }
            RuntimeVariant::Android => LookupSupport::Trusted,
            RuntimeVariant::Standard if self.vm_version >= PUBLIC_LOOKUP_VERSION => {
                LookupSupport::PublicOnly
            }
            RuntimeVariant::Standard => LookupSupport::Trusted,
        }
    }
}

/// Classify the hosting runtime from the process environment.
pub fn detect() -> RuntimeVariant {
    detect_from(std::env::var(VM_NAME_VAR).ok().as_deref())
}

/// Pure classification core; an unreadable property means `Standard`.
pub fn detect_from(vm_name: Option<&str>) -> RuntimeVariant {
    match vm_name {
        Some(name) if name == ANDROID_VM_NAME => RuntimeVariant::Android,
        _ => RuntimeVariant::Standard,
    }
}

/// Read the full runtime fingerprint from the process environment.
///
/// An unreadable or unparsable version property degrades to 0 rather than
/// failing; version 0 simply grants the fewest capabilities.
pub fn detect_profile() -> RuntimeProfile {
    let variant = detect();
    let vm_version = std::env::var(VM_VERSION_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0);

    debug!(?variant, vm_version, "Detected host runtime");

    RuntimeProfile {
        variant,
        vm_version,
    }
}

//! Process-wide logging setup shared by the storefront binaries.

/// Initialize tracing with the default `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Initialize tracing with `default_directive` used when `RUST_LOG` is unset.
pub fn init_with_default(default_directive: &str) {
    tracing::init(default_directive);
}

/// Subscriber construction (filters, layers).
pub mod tracing;

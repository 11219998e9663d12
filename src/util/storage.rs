//! localStorage reads for the shared session identity.
//!
//! The hosting application's auth module owns these keys; this crate only
//! reads them, once, when the chat view mounts. Requires a browser
//! environment, so real lookups are gated behind the `hydrate` feature.

use crate::config::ChatConfig;

/// Read the session username using the configured key order.
///
/// Returns the first configured key with a non-empty value, or `None` when
/// nothing is stored or outside a browser. No validation is performed.
pub fn read_username(config: &ChatConfig) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        config.resolve_username(|key| storage.get_item(key).ok().flatten())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        None
    }
}

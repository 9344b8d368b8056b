//! Key-value persistence behind the preference store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Preferences live in the page's `localStorage`. This module hides the
//! web-sys glue behind [`KeyValueStore`] so the preference store, the
//! reconciler, and their tests never touch the browser directly.
//!
//! TRADE-OFFS
//! ==========
//! Reads are infallible: a storage read that throws is reported as an absent
//! key, which the preference store already treats as "use the default".
//! Writes return errors so the settings panel can tell the user.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::TweakError;

/// String key-value storage with `localStorage` semantics.
pub trait KeyValueStore {
    /// Raw stored string for `key`, or `None` when absent or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), TweakError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), TweakError>;
}

/// In-memory store used when `localStorage` is unavailable, and by tests.
///
/// Clones share the same map. Test stores may carry a quota (in UTF-16 code
/// units, the unit browsers budget `localStorage` in) so writes fail the way
/// a full `localStorage` does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that rejects writes once keys and values exceed `quota` units.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_quota(quota: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota = Some(quota);
        store
    }

    /// Number of stored keys.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Whether nothing is stored.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.borrow().items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TweakError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = inner.quota {
            let used: usize = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| utf16_len(k) + utf16_len(v))
                .sum();
            if used + utf16_len(key) + utf16_len(value) > quota {
                return Err(TweakError::StorageWrite { key: key.to_owned(), reason: "quota exceeded".to_owned() });
            }
        }
        inner.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), TweakError> {
        self.inner.borrow_mut().items.remove(key);
        Ok(())
    }
}

/// The page's `window.localStorage`.
#[cfg(feature = "browser")]
#[derive(Clone, Debug)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "browser")]
impl LocalStorage {
    /// Open `window.localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`TweakError::StorageUnavailable`] when there is no window or
    /// the browser refuses access (privacy settings, sandboxed frames).
    pub fn open() -> Result<Self, TweakError> {
        let window = web_sys::window().ok_or(TweakError::StorageUnavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            _ => Err(TweakError::StorageUnavailable),
        }
    }
}

#[cfg(feature = "browser")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!(target: crate::consts::LOG_TARGET, "reading {key} failed: {}", crate::dom::browser::js_reason(&err));
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TweakError> {
        self.storage.set_item(key, value).map_err(|err| TweakError::StorageWrite {
            key: key.to_owned(),
            reason: crate::dom::browser::js_reason(&err),
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), TweakError> {
        self.storage.remove_item(key).map_err(|err| TweakError::StorageWrite {
            key: key.to_owned(),
            reason: crate::dom::browser::js_reason(&err),
        })
    }
}

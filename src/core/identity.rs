use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::value::Value;

/// Reserved object key carrying a list item's identity on the wire.
pub const ID_KEY: &str = "_id";

/// System-assigned, content-independent token that keeps a list element
/// re-identifiable across edits and reorders. Minted once at creation,
/// never recomputed from content; loaded tokens are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mint a fresh token: process-start entropy plus a monotonic counter,
    /// so tokens stay unique against ids loaded from persisted data.
    pub fn mint() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        static EPOCH: OnceLock<u64> = OnceLock::new();
        let epoch = EPOCH.get_or_init(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("i{epoch:x}-{n:x}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Read the identity carried by a list element, if any.
pub fn item_id(item: &Value) -> Option<ItemId> {
    item.get(ID_KEY).and_then(Value::as_text).map(ItemId::from)
}

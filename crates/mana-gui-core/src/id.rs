//! Widget identifiers.

use slotmap::new_key_type;

new_key_type! {
    /// A handle to a widget in a widget tree.
    ///
    /// `WidgetId`s are weak: holding one does not keep the widget alive. Each
    /// id carries a generation, so an id whose widget was destroyed never
    /// aliases a widget created later in the same slot. Use the tree's
    /// `exists` check before acting on a stored id.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the id to a raw u64 value.
    ///
    /// The raw value can be converted back using [`WidgetId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a `WidgetId` from a raw u64 value.
    ///
    /// This does not check whether the widget exists in any tree.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

static_assertions::assert_impl_all!(WidgetId: Copy, Send, Sync, std::hash::Hash, Eq);

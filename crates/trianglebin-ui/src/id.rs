/// Identity of a widget across frames.
///
/// Derived from the widget label, so two widgets with the same label in the
/// same frame share state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WidgetId(u64);

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl WidgetId {
    /// FNV-1a hash of `label`; stable across runs and platforms.
    pub const fn from_label(label: &str) -> Self {
        let bytes = label.as_bytes();
        let mut hash = FNV_OFFSET;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Identity of a child widget, e.g. one entry of a list.
    pub const fn child(self, index: u64) -> Self {
        Self((self.0 ^ index).wrapping_mul(FNV_PRIME))
    }
}

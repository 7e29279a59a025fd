//! Stable identifier wrappers for IR entities.

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// Creates an identifier from a raw value.
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            pub const fn value(self) -> u32 {
                self.0
            }

            /// Returns the identifier as a vector index.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id! {
    /// Result handle of one emitted instruction.
    TempId
}
define_id! {
    /// Handle of one per-function stack slot.
    SlotId
}
define_id! {
    /// Handle of one basic block within a function.
    BlockId
}

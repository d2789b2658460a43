use std::fmt::{self, Debug, Display};

/// Reference to a widget owned by a [Toolkit](crate::Toolkit).
///
/// A handle is a slot index paired with the generation of that slot at the time the widget
/// was created. When the toolkit destroys the widget, the slot's generation changes,
/// so every copy of the old handle becomes stale and is rejected by the toolkit
/// instead of silently referring to a different widget that reuses the slot.
///
/// Existence of a handle does not guarantee that the corresponding widget is still alive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeHandle {
    index: u32,
    generation: u32,
}

impl NativeHandle {
    /// Creates a handle from its raw parts.
    ///
    /// You shouldn't need to use this function directly unless you're implementing a toolkit.
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({}v{})", self.index, self.generation)
    }
}

impl Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

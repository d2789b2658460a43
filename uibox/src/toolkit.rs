pub mod headless;

use {
    crate::{types::Axis, NativeHandle},
    std::{fmt, rc::Rc},
    thiserror::Error,
};

/// Failure reported by a [Toolkit].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("stale native handle {0} (widget was destroyed)")]
    StaleHandle(NativeHandle),
    #[error("widget {0} is not a box")]
    NotABox(NativeHandle),
    #[error("widget {0} is not a label")]
    NotALabel(NativeHandle),
    #[error("widget {child} already has a parent {parent}")]
    AlreadyParented {
        child: NativeHandle,
        parent: NativeHandle,
    },
    #[error("widget {0} still has a parent and cannot be destroyed")]
    StillParented(NativeHandle),
    #[error("appending {child} to {parent} would create a cycle")]
    Cycle {
        parent: NativeHandle,
        child: NativeHandle,
    },
    #[error("child index {index} out of range for box {parent} with {len} children")]
    IndexOutOfRange {
        parent: NativeHandle,
        index: usize,
        len: usize,
    },
}

/// Native widget library that owns widget resources, computes layouts and paints.
///
/// All methods take `&self`; implementations keep their state behind interior mutability.
/// A toolkit is only ever accessed from the thread that created its [ToolkitHandle].
pub trait Toolkit {
    /// Creates an empty, non-padded box arranging its children along `axis`.
    fn create_box(&self, axis: Axis) -> Result<NativeHandle, ToolkitError>;

    /// Appends `child` to the end of box `parent`.
    fn append_child(
        &self,
        parent: NativeHandle,
        child: NativeHandle,
        stretchy: bool,
    ) -> Result<(), ToolkitError>;

    /// Detaches the child at `index` of box `parent` without destroying it.
    fn delete_child_at(&self, parent: NativeHandle, index: usize) -> Result<(), ToolkitError>;

    fn num_children(&self, parent: NativeHandle) -> Result<usize, ToolkitError>;

    fn is_padded(&self, handle: NativeHandle) -> Result<bool, ToolkitError>;

    /// Enables spacing between the children of a box. The amount of spacing
    /// is chosen by the toolkit.
    fn set_padded(&self, handle: NativeHandle, padded: bool) -> Result<(), ToolkitError>;

    fn create_label(&self, text: &str) -> Result<NativeHandle, ToolkitError>;

    fn label_text(&self, handle: NativeHandle) -> Result<String, ToolkitError>;

    fn set_label_text(&self, handle: NativeHandle, text: &str) -> Result<(), ToolkitError>;

    fn is_visible(&self, handle: NativeHandle) -> Result<bool, ToolkitError>;

    fn set_visible(&self, handle: NativeHandle, visible: bool) -> Result<(), ToolkitError>;

    fn is_enabled(&self, handle: NativeHandle) -> Result<bool, ToolkitError>;

    fn set_enabled(&self, handle: NativeHandle, enabled: bool) -> Result<(), ToolkitError>;

    /// Releases the widget's resources. The handle becomes stale.
    fn destroy_widget(&self, handle: NativeHandle) -> Result<(), ToolkitError>;
}

/// Shared reference to an initialized [Toolkit].
///
/// Every control keeps a clone of the handle it was created with. The handle is neither
/// `Send` nor `Sync`, so controls cannot leave the thread that owns the toolkit.
#[derive(Clone)]
pub struct ToolkitHandle {
    inner: Rc<dyn Toolkit>,
}

impl ToolkitHandle {
    pub fn new(toolkit: impl Toolkit + 'static) -> Self {
        Self {
            inner: Rc::new(toolkit),
        }
    }

    /// Returns true if both handles refer to the same toolkit instance.
    pub fn ptr_eq(&self, other: &ToolkitHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ToolkitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolkitHandle").finish()
    }
}

impl std::ops::Deref for ToolkitHandle {
    type Target = dyn Toolkit;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

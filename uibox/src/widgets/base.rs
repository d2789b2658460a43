use {
    crate::{error::Result, NativeHandle, ToolkitHandle},
    tracing::trace,
};

/// State shared by every control: the toolkit it lives in and its native handle.
///
/// A control owns its handle exclusively. The handle is released by [ControlBase::destroy],
/// which consumes the base so the handle can't be used afterwards.
#[derive(Debug)]
pub struct ControlBase {
    toolkit: ToolkitHandle,
    handle: NativeHandle,
}

impl ControlBase {
    /// Wraps a handle freshly created by `toolkit`.
    pub fn new(toolkit: ToolkitHandle, handle: NativeHandle) -> Self {
        Self { toolkit, handle }
    }

    pub fn native_handle(&self) -> NativeHandle {
        self.handle
    }

    pub fn toolkit(&self) -> &ToolkitHandle {
        &self.toolkit
    }

    pub fn is_visible(&self) -> Result<bool> {
        Ok(self.toolkit.is_visible(self.handle)?)
    }

    pub fn set_visible(&self, visible: bool) -> Result<()> {
        self.toolkit.set_visible(self.handle, visible)?;
        Ok(())
    }

    pub fn is_enabled(&self) -> Result<bool> {
        Ok(self.toolkit.is_enabled(self.handle)?)
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.toolkit.set_enabled(self.handle, enabled)?;
        Ok(())
    }

    pub fn destroy(self) -> Result<()> {
        trace!(handle = %self.handle, "destroying native widget");
        self.toolkit.destroy_widget(self.handle)?;
        Ok(())
    }
}

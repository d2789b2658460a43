use {
    super::ControlBase,
    crate::{error::Result, NativeHandle},
    std::any::Any,
};

/// A widget that can be placed inside a container.
///
/// Containers hold their children as `Box<dyn Control>` and only rely on the capabilities
/// declared here: reporting the native handle and tearing the widget down.
pub trait Control: Any {
    /// Returns full path to the control type as a string.
    ///
    /// It's recommended to use [impl_control_base!](crate::impl_control_base) macro
    /// to implement this method along with [base](Control::base) and [as_any](Control::as_any).
    fn type_name(&self) -> &'static str;

    /// Returns the [ControlBase] stored inside the control.
    fn base(&self) -> &ControlBase;

    fn as_any(&self) -> &dyn Any;

    fn native_handle(&self) -> NativeHandle {
        self.base().native_handle()
    }

    /// Releases the native resources of the control.
    ///
    /// The default implementation destroys the control's own handle. Containers override it
    /// to tear down their children first.
    fn destroy(self: Box<Self>) -> Result<()> {
        let handle = self.native_handle();
        self.base().toolkit().destroy_widget(handle)?;
        Ok(())
    }
}

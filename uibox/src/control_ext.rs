use crate::{error::Result, Control};

pub trait ControlExt: Control {
    /// Converts the control into a form accepted by container append methods.
    fn boxed(self) -> Box<dyn Control>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    fn show(&self) -> Result<()> {
        self.base().set_visible(true)
    }

    fn hide(&self) -> Result<()> {
        self.base().set_visible(false)
    }

    fn is_visible(&self) -> Result<bool> {
        self.base().is_visible()
    }

    fn enable(&self) -> Result<()> {
        self.base().set_enabled(true)
    }

    fn disable(&self) -> Result<()> {
        self.base().set_enabled(false)
    }

    fn is_enabled(&self) -> Result<bool> {
        self.base().is_enabled()
    }
}

impl<W: Control + ?Sized> ControlExt for W {}

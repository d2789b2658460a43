use {
    super::{Control, ControlBase},
    crate::{error::Result, impl_control_base, ToolkitHandle},
    std::fmt::Display,
};

/// Non-interactive line of text.
#[derive(Debug)]
pub struct Label {
    base: ControlBase,
}

impl Label {
    pub fn new(toolkit: &ToolkitHandle, text: impl Display) -> Result<Self> {
        let handle = toolkit.create_label(&text.to_string())?;
        Ok(Label {
            base: ControlBase::new(toolkit.clone(), handle),
        })
    }

    pub fn text(&self) -> Result<String> {
        Ok(self
            .base
            .toolkit()
            .label_text(self.base.native_handle())?)
    }

    pub fn set_text(&mut self, text: impl Display) -> Result<&mut Self> {
        self.base
            .toolkit()
            .set_label_text(self.base.native_handle(), &text.to_string())?;
        Ok(self)
    }
}

impl Control for Label {
    impl_control_base!();
}

mod base;
mod box_container;
mod control_trait;
mod label;

pub use self::{
    base::ControlBase,
    box_container::{BoxBuilder, BoxContainer},
    control_trait::Control,
    label::Label,
};

#[macro_export]
macro_rules! impl_control_base {
    () => {
        fn type_name(&self) -> &'static str {
            std::any::type_name::<Self>()
        }

        fn base(&self) -> &$crate::widgets::ControlBase {
            &self.base
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}

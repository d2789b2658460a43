mod control_ext;
mod error;
mod handle;
pub mod toolkit;
pub mod types;
pub mod widgets;

pub use {
    crate::{
        control_ext::ControlExt,
        error::{Error, Result},
        handle::NativeHandle,
        toolkit::{Toolkit, ToolkitError, ToolkitHandle},
    },
    widgets::{BoxBuilder, BoxContainer, Control, ControlBase, Label},
};

use {
    crate::{toolkit::ToolkitError, NativeHandle},
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
    #[error("widget {child} is already a child of box {parent}")]
    DuplicateChild {
        parent: NativeHandle,
        child: NativeHandle,
    },
    #[error("widget {child} was created by a different toolkit than box {parent}")]
    ForeignToolkit {
        parent: NativeHandle,
        child: NativeHandle,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

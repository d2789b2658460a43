use {
    super::{Control, ControlBase},
    crate::{
        error::{Error, Result},
        impl_control_base,
        types::Axis,
        ToolkitHandle,
    },
    std::fmt,
    tracing::{debug, trace, warn},
};

struct BoxChild {
    control: Box<dyn Control>,
    stretchy: bool,
}

/// Container that lays out its children in a single row or column.
///
/// In a horizontal box all children have the same height; in a vertical box they all have
/// the same width. Each child gets its preferred extent along the axis unless it's marked
/// stretchy, in which case it receives an equal share of the leftover space.
/// A padded box has spacing between its children; the amount is chosen by the toolkit.
///
/// The box owns its children. [delete](BoxContainer::delete) gives a child back to
/// the caller, [destroy](BoxContainer::destroy) tears down the whole subtree.
pub struct BoxContainer {
    base: ControlBase,
    axis: Axis,
    children: Vec<BoxChild>,
}

impl fmt::Debug for BoxContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxContainer")
            .field("handle", &self.base.native_handle())
            .field("axis", &self.axis)
            .field(
                "children",
                &self
                    .children
                    .iter()
                    .map(|child| (child.control.native_handle(), child.stretchy))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl BoxContainer {
    /// Creates an empty, non-padded box.
    pub fn new(toolkit: &ToolkitHandle, axis: Axis) -> Result<Self> {
        let handle = toolkit.create_box(axis)?;
        debug!(%handle, %axis, "created box");
        Ok(BoxContainer {
            base: ControlBase::new(toolkit.clone(), handle),
            axis,
            children: Vec::new(),
        })
    }

    pub fn horizontal(toolkit: &ToolkitHandle) -> Result<Self> {
        Self::new(toolkit, Axis::Horizontal)
    }

    pub fn vertical(toolkit: &ToolkitHandle) -> Result<Self> {
        Self::new(toolkit, Axis::Vertical)
    }

    pub fn builder(axis: Axis) -> BoxBuilder {
        BoxBuilder::new(axis)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&dyn Control> {
        self.children.get(index).map(|child| child.control.as_ref())
    }

    /// Returns the child at `index` if it has type `T`.
    pub fn child_as<T: Control>(&self, index: usize) -> Option<&T> {
        self.child(index)?.as_any().downcast_ref()
    }

    pub fn is_stretchy(&self, index: usize) -> Option<bool> {
        self.children.get(index).map(|child| child.stretchy)
    }

    /// Returns an iterator over the children and their stretch flags, in layout order.
    pub fn children(&self) -> impl Iterator<Item = (&dyn Control, bool)> {
        self.children
            .iter()
            .map(|child| (child.control.as_ref(), child.stretchy))
    }

    /// Adds a control to the end of the box.
    ///
    /// Passing `None` does nothing.
    pub fn append(
        &mut self,
        child: impl Into<Option<Box<dyn Control>>>,
        stretchy: bool,
    ) -> Result<()> {
        self.append_multiple_with_stretch(stretchy, [child])
    }

    /// Adds non-stretchy controls to the end of the box, in iteration order.
    ///
    /// `None` entries are skipped.
    pub fn append_multiple<I>(&mut self, children: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Control>>>,
    {
        self.append_multiple_with_stretch(false, children)
    }

    /// Adds controls to the end of the box, all with the same stretch flag.
    ///
    /// `None` entries are skipped. If the toolkit rejects a child, the children before it
    /// stay appended and the error is returned; the rejected control is dropped without
    /// being destroyed.
    pub fn append_multiple_with_stretch<I>(&mut self, stretchy: bool, children: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Control>>>,
    {
        for child in children {
            let child: Option<Box<dyn Control>> = child.into();
            let Some(control) = child else {
                trace!(handle = %self.base.native_handle(), "skipping empty child");
                continue;
            };
            self.push_child(control, stretchy)?;
        }
        Ok(())
    }

    fn push_child(&mut self, control: Box<dyn Control>, stretchy: bool) -> Result<()> {
        let parent = self.base.native_handle();
        let child = control.native_handle();
        // Handles are only meaningful inside the toolkit that issued them.
        if !control.base().toolkit().ptr_eq(self.base.toolkit()) {
            warn!(%parent, %child, "append: control belongs to a different toolkit");
            return Err(Error::ForeignToolkit { parent, child });
        }
        if self
            .children
            .iter()
            .any(|existing| existing.control.native_handle() == child)
        {
            warn!(%parent, %child, "append: control is already a child of this box");
            return Err(Error::DuplicateChild { parent, child });
        }
        self.base.toolkit().append_child(parent, child, stretchy)?;
        trace!(
            %parent,
            %child,
            stretchy,
            index = self.children.len(),
            child_type = control.type_name(),
            "appended child"
        );
        self.children.push(BoxChild { control, stretchy });
        Ok(())
    }

    /// Removes the child at `index` and returns it. Later children move one position up.
    ///
    /// The removed control is not destroyed; it belongs to the caller again.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete(&mut self, index: usize) -> Result<Box<dyn Control>> {
        let len = self.children.len();
        assert!(
            index < len,
            "BoxContainer::delete: index {index} out of range for box with {len} children"
        );
        let parent = self.base.native_handle();
        self.base.toolkit().delete_child_at(parent, index)?;
        let removed = self.children.remove(index);
        trace!(%parent, index, child = %removed.control.native_handle(), "deleted child");
        Ok(removed.control)
    }

    /// Destroys every child, front to back, and then the box itself.
    ///
    /// Each child is removed from the box before it's destroyed, so the toolkit never
    /// sees a destroyed widget that still has a parent. A failure doesn't stop the
    /// teardown: the remaining children and the box are still destroyed, and the first
    /// error is returned.
    pub fn destroy(mut self) -> Result<()> {
        let handle = self.base.native_handle();
        debug!(%handle, children = self.children.len(), "destroying box");
        let mut first_error = None;
        while !self.children.is_empty() {
            let result = match self.delete(0) {
                Ok(child) => child.destroy(),
                Err(err) => {
                    let child = self.children.remove(0).control;
                    warn!(%handle, child = %child.native_handle(), %err, "failed to detach child");
                    if let Err(destroy_err) = child.destroy() {
                        warn!(%handle, err = %destroy_err, "failed to destroy detached child");
                    }
                    Err(err)
                }
            };
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }
        let result = self.base.destroy();
        match first_error {
            Some(err) => Err(err),
            None => result,
        }
    }

    /// Reads the padding flag from the toolkit.
    pub fn is_padded(&self) -> Result<bool> {
        Ok(self.base.toolkit().is_padded(self.base.native_handle())?)
    }

    pub fn set_padded(&mut self, padded: bool) -> Result<()> {
        self.base
            .toolkit()
            .set_padded(self.base.native_handle(), padded)?;
        Ok(())
    }
}

impl Control for BoxContainer {
    impl_control_base!();

    fn destroy(self: Box<Self>) -> Result<()> {
        BoxContainer::destroy(*self)
    }
}

/// Creates a [BoxContainer] with initial padding and children.
pub struct BoxBuilder {
    axis: Axis,
    padded: bool,
    children: Vec<(Box<dyn Control>, bool)>,
}

impl BoxBuilder {
    pub fn new(axis: Axis) -> BoxBuilder {
        BoxBuilder {
            axis,
            padded: false,
            children: Vec::new(),
        }
    }

    pub fn padded(mut self, padded: bool) -> BoxBuilder {
        self.padded = padded;
        self
    }

    pub fn child(mut self, control: impl Control, stretchy: bool) -> BoxBuilder {
        let control: Box<dyn Control> = Box::new(control);
        self.children.push((control, stretchy));
        self
    }

    pub fn build(self, toolkit: &ToolkitHandle) -> Result<BoxContainer> {
        let mut container = BoxContainer::new(toolkit, self.axis)?;
        if self.padded {
            container.set_padded(true)?;
        }
        for (control, stretchy) in self.children {
            container.append(control, stretchy)?;
        }
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            toolkit::headless::{ChildEntry, HeadlessToolkit},
            ControlExt, Label, NativeHandle, Toolkit, ToolkitError,
        },
    };

    fn setup() -> (HeadlessToolkit, ToolkitHandle) {
        let headless = HeadlessToolkit::new();
        let toolkit = ToolkitHandle::new(headless.clone());
        (headless, toolkit)
    }

    fn label(toolkit: &ToolkitHandle, text: &str) -> Box<dyn Control> {
        Label::new(toolkit, text).unwrap().boxed()
    }

    fn texts(container: &BoxContainer) -> Vec<String> {
        (0..container.len())
            .map(|i| container.child_as::<Label>(i).unwrap().text().unwrap())
            .collect()
    }

    #[test]
    fn created_empty_and_not_padded() {
        let (headless, toolkit) = setup();
        let container = BoxContainer::vertical(&toolkit).unwrap();
        assert_eq!(container.axis(), Axis::Vertical);
        assert!(container.is_empty());
        assert!(!container.is_padded().unwrap());
        assert_eq!(
            headless.axis_of(container.native_handle()).unwrap(),
            Axis::Vertical
        );
    }

    #[test]
    fn append_none_is_noop() {
        let (headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        container.append(None::<Box<dyn Control>>, true).unwrap();
        container
            .append_multiple([None, Some(label(&toolkit, "a")), None])
            .unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(headless.num_children(container.native_handle()).unwrap(), 1);
        assert_eq!(texts(&container), vec!["a"]);
    }

    #[test]
    fn append_multiple_with_stretch_keeps_order() {
        let (headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        let controls = [
            label(&toolkit, "A"),
            label(&toolkit, "B"),
            label(&toolkit, "C"),
        ];
        let handles: Vec<NativeHandle> = controls.iter().map(|c| c.native_handle()).collect();
        container
            .append_multiple_with_stretch(true, controls)
            .unwrap();

        assert_eq!(texts(&container), vec!["A", "B", "C"]);
        assert!(container.children().all(|(_, stretchy)| stretchy));
        assert_eq!(
            headless.children_of(container.native_handle()).unwrap(),
            handles
                .iter()
                .map(|&handle| ChildEntry {
                    handle,
                    stretchy: true
                })
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn append_multiple_is_not_stretchy() {
        let (_headless, toolkit) = setup();
        let mut container = BoxContainer::vertical(&toolkit).unwrap();
        container
            .append_multiple([label(&toolkit, "a"), label(&toolkit, "b")])
            .unwrap();
        container.append(label(&toolkit, "c"), true).unwrap();
        assert_eq!(container.is_stretchy(0), Some(false));
        assert_eq!(container.is_stretchy(1), Some(false));
        assert_eq!(container.is_stretchy(2), Some(true));
        assert_eq!(container.is_stretchy(3), None);
    }

    #[test]
    fn delete_shifts_following_children() {
        let (headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        container
            .append_multiple([
                label(&toolkit, "A"),
                label(&toolkit, "B"),
                label(&toolkit, "C"),
            ])
            .unwrap();
        let a = container.child(0).unwrap().native_handle();
        let c = container.child(2).unwrap().native_handle();

        let removed = container.delete(1).unwrap();
        assert_eq!(texts(&container), vec!["A", "C"]);
        let native = headless.children_of(container.native_handle()).unwrap();
        assert_eq!(native[0].handle, a);
        assert_eq!(native[1].handle, c);

        // Ownership is back with the caller: the widget is alive and detached.
        assert!(headless.is_alive(removed.native_handle()));
        assert_eq!(headless.parent_of(removed.native_handle()).unwrap(), None);
        container.append(removed, false).unwrap();
        assert_eq!(texts(&container), vec!["A", "C", "B"]);
    }

    #[test]
    #[should_panic(expected = "index 2 out of range")]
    fn delete_out_of_range_panics() {
        let (_headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        container
            .append_multiple([label(&toolkit, "a"), label(&toolkit, "b")])
            .unwrap();
        let _ = container.delete(2);
    }

    #[test]
    fn destroy_tears_down_subtree() {
        let (headless, toolkit) = setup();
        let mut inner = BoxContainer::vertical(&toolkit).unwrap();
        inner.append(label(&toolkit, "nested"), false).unwrap();
        let nested = inner.child(0).unwrap().native_handle();

        let mut outer = BoxContainer::horizontal(&toolkit).unwrap();
        outer.append(label(&toolkit, "A"), false).unwrap();
        outer.append(inner.boxed(), true).unwrap();
        let handles: Vec<NativeHandle> = outer
            .children()
            .map(|(control, _)| control.native_handle())
            .chain([outer.native_handle(), nested])
            .collect();
        assert_eq!(headless.live_widgets(), 4);

        outer.destroy().unwrap();
        for handle in handles {
            assert!(!headless.is_alive(handle), "{handle} is still alive");
        }
        assert_eq!(headless.live_widgets(), 0);
    }

    #[test]
    fn destroy_continues_after_child_failure() {
        let (headless, toolkit) = setup();
        let mut outer = BoxContainer::horizontal(&toolkit).unwrap();
        outer.append(label(&toolkit, "x"), false).unwrap();
        outer.append(label(&toolkit, "y"), false).unwrap();
        let x = outer.child(0).unwrap().native_handle();

        // Tear x down behind the container's back.
        headless.delete_child_at(outer.native_handle(), 0).unwrap();
        headless.destroy_widget(x).unwrap();

        assert_eq!(
            outer.destroy(),
            Err(Error::Toolkit(ToolkitError::StaleHandle(x)))
        );
        assert_eq!(headless.live_widgets(), 0, "teardown stopped early");
    }

    #[test]
    fn destroy_empty_box() {
        let (headless, toolkit) = setup();
        let container = BoxContainer::vertical(&toolkit).unwrap();
        let handle = container.native_handle();
        container.destroy().unwrap();
        assert!(!headless.is_alive(handle));
        assert_eq!(
            toolkit.is_padded(handle),
            Err(ToolkitError::StaleHandle(handle))
        );
    }

    #[test]
    fn padded_round_trip() {
        let (headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        container.set_padded(true).unwrap();
        assert!(container.is_padded().unwrap());
        assert!(headless.is_padded(container.native_handle()).unwrap());
        container.set_padded(false).unwrap();
        assert!(!container.is_padded().unwrap());
    }

    #[test]
    fn duplicate_handle_rejected() {
        struct Alias {
            base: ControlBase,
        }

        impl Control for Alias {
            impl_control_base!();
        }

        let (headless, toolkit) = setup();
        let mut container = BoxContainer::horizontal(&toolkit).unwrap();
        container.append(label(&toolkit, "a"), false).unwrap();
        let handle = container.child(0).unwrap().native_handle();

        let alias = Alias {
            base: ControlBase::new(toolkit.clone(), handle),
        };
        assert_eq!(
            container.append(alias.boxed(), false),
            Err(Error::DuplicateChild {
                parent: container.native_handle(),
                child: handle
            })
        );
        assert_eq!(container.len(), 1);
        assert_eq!(headless.num_children(container.native_handle()).unwrap(), 1);
    }

    #[test]
    fn foreign_toolkit_child_rejected() {
        let (_, first) = setup();
        let _first_box = BoxContainer::horizontal(&first).unwrap();
        let foreign = label(&first, "foreign");

        let (headless, second) = setup();
        let mut container = BoxContainer::horizontal(&second).unwrap();
        let own = Label::new(&second, "own").unwrap();
        // Both toolkits issued the same handle value.
        assert_eq!(foreign.native_handle(), own.native_handle());

        assert_eq!(
            container.append(foreign, false),
            Err(Error::ForeignToolkit {
                parent: container.native_handle(),
                child: own.native_handle()
            })
        );
        assert!(container.is_empty());
        assert_eq!(headless.num_children(container.native_handle()).unwrap(), 0);
        assert_eq!(headless.parent_of(own.native_handle()).unwrap(), None);
    }

    #[test]
    fn toolkit_errors_propagate() {
        let (headless, toolkit) = setup();
        let mut first = BoxContainer::horizontal(&toolkit).unwrap();
        let mut second = BoxContainer::horizontal(&toolkit).unwrap();
        first.append(label(&toolkit, "a"), false).unwrap();
        let shared = first.child(0).unwrap().native_handle();

        struct Alias {
            base: ControlBase,
        }

        impl Control for Alias {
            impl_control_base!();
        }

        let alias = Alias {
            base: ControlBase::new(toolkit.clone(), shared),
        };
        assert_eq!(
            second.append(alias.boxed(), false),
            Err(Error::Toolkit(ToolkitError::AlreadyParented {
                child: shared,
                parent: first.native_handle()
            }))
        );
        assert!(second.is_empty());
        assert_eq!(headless.num_children(second.native_handle()).unwrap(), 0);
    }

    #[test]
    fn builder_applies_options() {
        let (headless, toolkit) = setup();
        let container = BoxContainer::builder(Axis::Vertical)
            .padded(true)
            .child(Label::new(&toolkit, "a").unwrap(), false)
            .child(Label::new(&toolkit, "b").unwrap(), true)
            .build(&toolkit)
            .unwrap();
        assert!(container.is_padded().unwrap());
        assert_eq!(texts(&container), vec!["a", "b"]);
        assert_eq!(container.is_stretchy(1), Some(true));
        assert_eq!(headless.num_children(container.native_handle()).unwrap(), 2);
    }
}

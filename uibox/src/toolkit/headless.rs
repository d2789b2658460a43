//! In-process toolkit that keeps the widget tree in an arena.
//!
//! [HeadlessToolkit] does not paint anything. It tracks the same state a native
//! widget library would (parent links, child order, stretch flags, padding, visibility)
//! and computes box layouts, which makes it suitable for tests and for tools that
//! only need geometry.

mod layout;

use {
    self::layout::LayoutItem,
    super::{Toolkit, ToolkitError},
    crate::{
        types::{Axis, PhysicalPixels, PpxSuffix, Rect, Size},
        NativeHandle,
    },
    std::{cell::RefCell, fmt, rc::Rc},
    tracing::{debug, trace, warn},
};

/// Settings of a [HeadlessToolkit].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Space inserted between the children of a padded box.
    pub padding: PhysicalPixels,
    /// Width of one character of label text.
    pub char_width: PhysicalPixels,
    /// Height of a label.
    pub line_height: PhysicalPixels,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            padding: 6.ppx(),
            char_width: 7.ppx(),
            line_height: 16.ppx(),
        }
    }
}

pub struct HeadlessBuilder {
    config: HeadlessConfig,
}

impl Default for HeadlessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBuilder {
    pub fn new() -> HeadlessBuilder {
        HeadlessBuilder {
            config: HeadlessConfig::default(),
        }
    }

    pub fn with_padding(mut self, padding: i32) -> HeadlessBuilder {
        self.config.padding = padding.ppx();
        self
    }

    pub fn with_char_width(mut self, width: i32) -> HeadlessBuilder {
        self.config.char_width = width.ppx();
        self
    }

    pub fn with_line_height(mut self, height: i32) -> HeadlessBuilder {
        self.config.line_height = height.ppx();
        self
    }

    pub fn build(self) -> HeadlessToolkit {
        HeadlessToolkit::with_config(self.config)
    }
}

/// Child of a box as recorded by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildEntry {
    pub handle: NativeHandle,
    pub stretchy: bool,
}

#[derive(Debug)]
struct BoxData {
    axis: Axis,
    children: Vec<ChildEntry>,
    padded: bool,
}

#[derive(Debug)]
enum WidgetKind {
    Box(BoxData),
    Label { text: String },
}

#[derive(Debug)]
struct WidgetData {
    kind: WidgetKind,
    parent: Option<NativeHandle>,
    visible: bool,
    enabled: bool,
}

impl WidgetData {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            parent: None,
            visible: true,
            enabled: true,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    widget: Option<WidgetData>,
}

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Arena {
    fn alloc(&mut self, widget: WidgetData) -> NativeHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.widget = Some(widget);
            NativeHandle::from_raw_parts(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                widget: Some(widget),
            });
            NativeHandle::from_raw_parts(index, 0)
        }
    }

    fn get(&self, handle: NativeHandle) -> Result<&WidgetData, ToolkitError> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.widget.as_ref())
            .ok_or(ToolkitError::StaleHandle(handle))
    }

    fn get_mut(&mut self, handle: NativeHandle) -> Result<&mut WidgetData, ToolkitError> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.widget.as_mut())
            .ok_or(ToolkitError::StaleHandle(handle))
    }

    fn get_box(&self, handle: NativeHandle) -> Result<&BoxData, ToolkitError> {
        match &self.get(handle)?.kind {
            WidgetKind::Box(data) => Ok(data),
            _ => Err(ToolkitError::NotABox(handle)),
        }
    }

    fn get_box_mut(&mut self, handle: NativeHandle) -> Result<&mut BoxData, ToolkitError> {
        match &mut self.get_mut(handle)?.kind {
            WidgetKind::Box(data) => Ok(data),
            _ => Err(ToolkitError::NotABox(handle)),
        }
    }

    fn is_ancestor_or_self(
        &self,
        candidate: NativeHandle,
        mut handle: NativeHandle,
    ) -> Result<bool, ToolkitError> {
        loop {
            if handle == candidate {
                return Ok(true);
            }
            match self.get(handle)?.parent {
                Some(parent) => handle = parent,
                None => return Ok(false),
            }
        }
    }

    /// Frees the widget's slot, along with any children if it's a box.
    /// The caller is responsible for detaching `handle` from its parent first.
    fn release(&mut self, handle: NativeHandle) -> Result<(), ToolkitError> {
        let slot = self
            .slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .ok_or(ToolkitError::StaleHandle(handle))?;
        let widget = slot.widget.take().ok_or(ToolkitError::StaleHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        self.live -= 1;

        if let WidgetKind::Box(data) = widget.kind {
            for child in data.children {
                trace!(parent = %handle, child = %child.handle, "releasing child of destroyed box");
                self.release(child.handle)?;
            }
        }
        Ok(())
    }

    fn preferred_size(
        &self,
        handle: NativeHandle,
        config: &HeadlessConfig,
    ) -> Result<Size, ToolkitError> {
        match &self.get(handle)?.kind {
            WidgetKind::Label { text } => Ok(Size::new(
                config.char_width * i32::try_from(text.chars().count()).unwrap_or(i32::MAX),
                config.line_height,
            )),
            WidgetKind::Box(data) => {
                let items = self.layout_items(data, config)?;
                Ok(layout::preferred_size(
                    data.axis,
                    &items,
                    box_padding(data, config),
                ))
            }
        }
    }

    fn layout_items(
        &self,
        data: &BoxData,
        config: &HeadlessConfig,
    ) -> Result<Vec<LayoutItem>, ToolkitError> {
        data.children
            .iter()
            .map(|child| {
                Ok(LayoutItem {
                    preferred: self.preferred_size(child.handle, config)?,
                    stretchy: child.stretchy,
                    visible: self.get(child.handle)?.visible,
                })
            })
            .collect()
    }
}

fn box_padding(data: &BoxData, config: &HeadlessConfig) -> PhysicalPixels {
    if data.padded {
        config.padding
    } else {
        0.ppx()
    }
}

/// Arena-backed [Toolkit] implementation.
///
/// Clones share the same widget tree, so a test can keep a clone for inspection
/// after handing the toolkit over to a [ToolkitHandle](crate::ToolkitHandle).
#[derive(Clone, Default)]
pub struct HeadlessToolkit {
    arena: Rc<RefCell<Arena>>,
    config: Rc<HeadlessConfig>,
}

impl fmt::Debug for HeadlessToolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessToolkit")
            .field("config", &self.config)
            .field("live_widgets", &self.live_widgets())
            .finish()
    }
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HeadlessBuilder {
        HeadlessBuilder::new()
    }

    pub fn with_config(config: HeadlessConfig) -> Self {
        debug!(?config, "creating headless toolkit");
        Self {
            arena: Rc::default(),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    /// Returns true if `handle` refers to a widget that hasn't been destroyed.
    pub fn is_alive(&self, handle: NativeHandle) -> bool {
        self.arena.borrow().get(handle).is_ok()
    }

    /// Number of widgets that have been created and not yet destroyed.
    pub fn live_widgets(&self) -> usize {
        self.arena.borrow().live
    }

    pub fn children_of(&self, handle: NativeHandle) -> Result<Vec<ChildEntry>, ToolkitError> {
        Ok(self.arena.borrow().get_box(handle)?.children.clone())
    }

    pub fn parent_of(&self, handle: NativeHandle) -> Result<Option<NativeHandle>, ToolkitError> {
        Ok(self.arena.borrow().get(handle)?.parent)
    }

    pub fn axis_of(&self, handle: NativeHandle) -> Result<Axis, ToolkitError> {
        Ok(self.arena.borrow().get_box(handle)?.axis)
    }

    /// Size the widget needs to show all of its visible content at preferred sizes.
    pub fn preferred_size(&self, handle: NativeHandle) -> Result<Size, ToolkitError> {
        self.arena.borrow().preferred_size(handle, &self.config)
    }

    /// Computes the rects of the box's children, relative to the box, for a box of
    /// the given size. The result has one rect per child in child order.
    pub fn layout(&self, handle: NativeHandle, size: Size) -> Result<Vec<Rect>, ToolkitError> {
        let arena = self.arena.borrow();
        let data = arena.get_box(handle)?;
        let items = arena.layout_items(data, &self.config)?;
        Ok(layout::solve(
            data.axis,
            &items,
            size,
            box_padding(data, &self.config),
        ))
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_box(&self, axis: Axis) -> Result<NativeHandle, ToolkitError> {
        let handle = self.arena.borrow_mut().alloc(WidgetData::new(WidgetKind::Box(BoxData {
            axis,
            children: Vec::new(),
            padded: false,
        })));
        trace!(%handle, %axis, "create_box");
        Ok(handle)
    }

    fn append_child(
        &self,
        parent: NativeHandle,
        child: NativeHandle,
        stretchy: bool,
    ) -> Result<(), ToolkitError> {
        let mut arena = self.arena.borrow_mut();
        arena.get_box(parent)?;
        if let Some(existing) = arena.get(child)?.parent {
            warn!(%parent, %child, %existing, "append_child: child already has a parent");
            return Err(ToolkitError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if arena.is_ancestor_or_self(child, parent)? {
            warn!(%parent, %child, "append_child: cycle");
            return Err(ToolkitError::Cycle { parent, child });
        }
        arena.get_mut(child)?.parent = Some(parent);
        arena
            .get_box_mut(parent)?
            .children
            .push(ChildEntry { handle: child, stretchy });
        trace!(%parent, %child, stretchy, "append_child");
        Ok(())
    }

    fn delete_child_at(&self, parent: NativeHandle, index: usize) -> Result<(), ToolkitError> {
        let mut arena = self.arena.borrow_mut();
        let data = arena.get_box_mut(parent)?;
        let len = data.children.len();
        if index >= len {
            return Err(ToolkitError::IndexOutOfRange { parent, index, len });
        }
        let removed = data.children.remove(index);
        arena.get_mut(removed.handle)?.parent = None;
        trace!(%parent, index, child = %removed.handle, "delete_child_at");
        Ok(())
    }

    fn num_children(&self, parent: NativeHandle) -> Result<usize, ToolkitError> {
        Ok(self.arena.borrow().get_box(parent)?.children.len())
    }

    fn is_padded(&self, handle: NativeHandle) -> Result<bool, ToolkitError> {
        Ok(self.arena.borrow().get_box(handle)?.padded)
    }

    fn set_padded(&self, handle: NativeHandle, padded: bool) -> Result<(), ToolkitError> {
        self.arena.borrow_mut().get_box_mut(handle)?.padded = padded;
        Ok(())
    }

    fn create_label(&self, text: &str) -> Result<NativeHandle, ToolkitError> {
        let handle = self
            .arena
            .borrow_mut()
            .alloc(WidgetData::new(WidgetKind::Label {
                text: text.to_string(),
            }));
        trace!(%handle, text, "create_label");
        Ok(handle)
    }

    fn label_text(&self, handle: NativeHandle) -> Result<String, ToolkitError> {
        match &self.arena.borrow().get(handle)?.kind {
            WidgetKind::Label { text } => Ok(text.clone()),
            _ => Err(ToolkitError::NotALabel(handle)),
        }
    }

    fn set_label_text(&self, handle: NativeHandle, text: &str) -> Result<(), ToolkitError> {
        match &mut self.arena.borrow_mut().get_mut(handle)?.kind {
            WidgetKind::Label { text: current } => {
                *current = text.to_string();
                Ok(())
            }
            _ => Err(ToolkitError::NotALabel(handle)),
        }
    }

    fn is_visible(&self, handle: NativeHandle) -> Result<bool, ToolkitError> {
        Ok(self.arena.borrow().get(handle)?.visible)
    }

    fn set_visible(&self, handle: NativeHandle, visible: bool) -> Result<(), ToolkitError> {
        self.arena.borrow_mut().get_mut(handle)?.visible = visible;
        Ok(())
    }

    fn is_enabled(&self, handle: NativeHandle) -> Result<bool, ToolkitError> {
        Ok(self.arena.borrow().get(handle)?.enabled)
    }

    fn set_enabled(&self, handle: NativeHandle, enabled: bool) -> Result<(), ToolkitError> {
        self.arena.borrow_mut().get_mut(handle)?.enabled = enabled;
        Ok(())
    }

    fn destroy_widget(&self, handle: NativeHandle) -> Result<(), ToolkitError> {
        let mut arena = self.arena.borrow_mut();
        if arena.get(handle)?.parent.is_some() {
            warn!(%handle, "destroy_widget: widget still has a parent");
            return Err(ToolkitError::StillParented(handle));
        }
        arena.release(handle)?;
        trace!(%handle, "destroy_widget");
        Ok(())
    }
}

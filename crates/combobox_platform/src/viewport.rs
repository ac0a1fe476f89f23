//! Viewport scroll capability
//!
//! The focus arbiter needs to read and restore the page scroll position
//! around a suppressed blur. Hosts expose that through [`Viewport`] instead
//! of the engine touching global window state.

use std::cell::RefCell;
use std::rc::Rc;

/// A scroll offset in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for ScrollOffset {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Read/write access to the page scroll offset
pub trait Viewport {
    /// Current scroll offset
    fn scroll_offset(&self) -> ScrollOffset;

    /// Scroll to an absolute offset
    fn set_scroll_offset(&mut self, offset: ScrollOffset);
}

/// Shared viewport, so a host can keep a handle to the same viewport it
/// gave the engine
impl<V: Viewport + ?Sized> Viewport for Rc<RefCell<V>> {
    fn scroll_offset(&self) -> ScrollOffset {
        self.borrow().scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.borrow_mut().set_scroll_offset(offset);
    }
}

/// In-memory viewport for headless hosts and tests
///
/// Records every write so tests can assert how often the offset was
/// restored.
#[derive(Clone, Debug, Default)]
pub struct MemoryViewport {
    offset: ScrollOffset,
    writes: Vec<ScrollOffset>,
}

impl MemoryViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport already scrolled to `offset`
    pub fn at(offset: ScrollOffset) -> Self {
        Self {
            offset,
            writes: Vec::new(),
        }
    }

    /// Move the viewport without recording a write
    ///
    /// Simulates the host scrolling on its own, e.g. when focusing an input
    /// scrolls it into view.
    pub fn scroll_externally(&mut self, offset: ScrollOffset) {
        self.offset = offset;
    }

    /// Offsets written through [`Viewport::set_scroll_offset`], oldest first
    pub fn writes(&self) -> &[ScrollOffset] {
        &self.writes
    }
}

impl Viewport for MemoryViewport {
    fn scroll_offset(&self) -> ScrollOffset {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        tracing::trace!("viewport scrolled to ({}, {})", offset.x, offset.y);
        self.offset = offset;
        self.writes.push(offset);
    }
}

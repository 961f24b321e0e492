//! Width measurement on a hidden, off-screen surface.
//!
//! A [`MeasureContext`] stands for the element the label is rendered into: it
//! knows the style the visible text uses and whether it has been laid out.
//! [`MeasureContext::create`] lends a surface for one fitting run. The surface
//! is reused for every measurement of that run and released when dropped, so
//! every exit path of the run gives it back exactly once.

use log::trace;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::text::display_width;

/// Something that reports the rendered width of a string.
pub trait Measure {
    /// Rendered width of `text`, in the surface's unit (cells for the terminal).
    fn measure(&mut self, text: &str) -> f64;

    /// Release the surface. Dropping it has the same effect.
    fn destroy(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

/// A rendering context that can lend a hidden measuring surface.
pub trait MeasureContext {
    type Surface: Measure;

    /// Acquire a surface for one measurement session.
    fn create(&self) -> Self::Surface;
}

/// Terminal rendering context of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellContext {
    /// Style of the visible text; copied onto the measuring surface.
    pub style: Style,
    /// Inner width of the container, `None` until it has been laid out.
    pub content_width: Option<u16>,
}

impl CellContext {
    pub fn new(style: Style, content_width: Option<u16>) -> Self {
        Self {
            style,
            content_width,
        }
    }

    /// Whether the container has been laid out and may be measured against.
    pub fn is_laid_out(&self) -> bool {
        self.content_width.is_some()
    }
}

impl MeasureContext for CellContext {
    type Surface = BufferSurface;

    fn create(&self) -> BufferSurface {
        BufferSurface::new(self.style, self.content_width.unwrap_or(0))
    }
}

/// Off-screen single-row buffer used as the hidden measuring surface.
///
/// Nothing written here ever reaches the terminal: the buffer is not part of
/// any frame and is dropped at the end of the run.
#[derive(Debug)]
pub struct BufferSurface {
    buffer: Buffer,
    style: Style,
}

impl BufferSurface {
    fn new(style: Style, capacity: u16) -> Self {
        trace!("measuring surface acquired ({capacity} cells)");
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, capacity.max(1), 1)),
            style,
        }
    }

    /// Current capacity of the surface in cells.
    pub fn capacity(&self) -> u16 {
        self.buffer.area.width
    }
}

impl Measure for BufferSurface {
    fn measure(&mut self, text: &str) -> f64 {
        let needed = u16::try_from(display_width(text)).unwrap_or(u16::MAX);
        if needed > self.buffer.area.width {
            self.buffer.resize(Rect::new(0, 0, needed, 1));
        }
        self.buffer.reset();

        let max_width = usize::from(self.buffer.area.width);
        let (end_x, _) = self.buffer.set_stringn(0, 0, text, max_width, self.style);
        f64::from(end_x)
    }
}

impl Drop for BufferSurface {
    fn drop(&mut self) {
        trace!("measuring surface released ({} cells)", self.capacity());
    }
}

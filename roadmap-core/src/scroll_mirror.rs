//! Decorative top scrollbar that tracks the main roadmap scroller.

use std::rc::Rc;

/// Scroll positions that differ by less than this are treated as equal, so a
/// browser rounding a fractional offset cannot start a ping-pong.
const SUBPIXEL_TOLERANCE: f64 = 0.5;

pub trait ScrollRegion {
    fn scroll_left(&self) -> f64;
    fn set_scroll_left(&self, offset: f64);
    fn scroll_width(&self) -> f64;
    /// Width of the region's inner content; only meaningful for the bar.
    fn set_content_width(&self, width: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bar,
    Content,
}

pub struct ScrollMirror {
    bar: Rc<dyn ScrollRegion>,
    content: Rc<dyn ScrollRegion>,
}

impl ScrollMirror {
    #[must_use]
    pub fn new(bar: Rc<dyn ScrollRegion>, content: Rc<dyn ScrollRegion>) -> Self {
        Self { bar, content }
    }

    /// Size the bar's inner strip to the content's full scroll width.
    pub fn sync_width(&self) {
        self.bar.set_content_width(self.content.scroll_width());
    }

    /// Handle a scroll event from `source`. Returns `true` if the opposite
    /// region was moved.
    pub fn on_scroll(&self, source: Side) -> bool {
        let (from, to) = match source {
            Side::Bar => (&self.bar, &self.content),
            Side::Content => (&self.content, &self.bar),
        };
        let offset = from.scroll_left();
        if (to.scroll_left() - offset).abs() < SUBPIXEL_TOLERANCE {
            return false;
        }
        to.set_scroll_left(offset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Region {
        left: Cell<f64>,
        width: Cell<f64>,
        content_width: Cell<f64>,
    }

    impl ScrollRegion for Region {
        fn scroll_left(&self) -> f64 {
            self.left.get()
        }
        fn set_scroll_left(&self, offset: f64) {
            self.left.set(offset);
        }
        fn scroll_width(&self) -> f64 {
            self.width.get()
        }
        fn set_content_width(&self, width: f64) {
            self.content_width.set(width);
        }
    }

    fn pair() -> (Rc<Region>, Rc<Region>, ScrollMirror) {
        let bar = Rc::new(Region::default());
        let content = Rc::new(Region::default());
        let mirror = ScrollMirror::new(bar.clone(), content.clone());
        (bar, content, mirror)
    }

    #[test]
    fn sync_width_copies_content_scroll_width() {
        let (bar, content, mirror) = pair();
        content.width.set(4800.0);
        mirror.sync_width();
        assert!((bar.content_width.get() - 4800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scrolling_either_side_moves_the_other() {
        let (bar, content, mirror) = pair();
        content.left.set(320.0);
        assert!(mirror.on_scroll(Side::Content));
        assert!((bar.left.get() - 320.0).abs() < f64::EPSILON);

        bar.left.set(40.0);
        assert!(mirror.on_scroll(Side::Bar));
        assert!((content.left.get() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equal_offsets_are_left_alone() {
        let (bar, content, mirror) = pair();
        bar.left.set(100.0);
        content.left.set(100.2);
        assert!(!mirror.on_scroll(Side::Content));
        assert!(!mirror.on_scroll(Side::Bar));
    }
}

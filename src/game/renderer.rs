//! Render Queue
//!
//! Drawables enqueue themselves during the draw phase; `flush` renders them
//! back to front by ascending order value and empties the queue. Ties keep
//! enqueue order, so a later entry with the same value paints over an
//! earlier one.
//!
//! Entries are shared handles: the component that owns a drawable keeps it
//! between frames and hands the queue a clone each draw.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::render::RasterSink;

/// Anything the queue can paint.
pub trait Drawable {
    /// Sort key. Lower paints first, so larger values end up on top.
    fn order_value(&self) -> i64;

    /// Paint into `sink`.
    fn render_into(&self, sink: &mut dyn RasterSink);
}

/// Reserved order values for layers that must sit outside the depth range
/// of world objects.
pub mod order {
    /// Ground layer, beneath everything
    pub const ALWAYS_BEHIND: i64 = -10_000_000;
    /// HUD elements drawn over the world
    pub const OVERLAY: i64 = 1_000_000;
    /// Above every overlay
    pub const ALWAYS_ON_TOP: i64 = 10_000_000;
}

/// Per-frame ordered collection of drawables.
#[derive(Default)]
pub struct RenderQueue {
    /// Keyed by (order value, enqueue sequence) so equal values stay FIFO
    entries: BTreeMap<(i64, u64), Rc<dyn Drawable>>,
    next_seq: u64,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `drawable` for this frame. Enqueueing the same drawable twice
    /// paints it twice.
    pub fn enqueue(&mut self, drawable: Rc<dyn Drawable>) {
        let key = (drawable.order_value(), self.next_seq);
        self.next_seq += 1;
        self.entries.insert(key, drawable);
    }

    /// Paint every entry in order, then leave the queue empty.
    pub fn flush(&mut self, sink: &mut dyn RasterSink) {
        let entries = std::mem::take(&mut self.entries);
        self.next_seq = 0;
        for drawable in entries.into_values() {
            drawable.render_into(sink);
        }
    }

    /// Drop everything queued without painting it.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue")
            .field(
                "order_values",
                &self.entries.keys().map(|(order, _)| *order).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, Rect, RecordingSink};
    use macroquad::color::Color;
    use macroquad::math::Vec2;

    /// Paints a point whose x coordinate identifies it.
    struct Marker {
        order: i64,
        tag: f32,
    }

    impl Drawable for Marker {
        fn order_value(&self) -> i64 {
            self.order
        }

        fn render_into(&self, sink: &mut dyn RasterSink) {
            sink.point(Vec2::new(self.tag, 0.0), 1.0, Color::new(1.0, 1.0, 1.0, 1.0));
        }
    }

    fn marker(order: i64, tag: f32) -> Rc<dyn Drawable> {
        Rc::new(Marker { order, tag })
    }

    fn painted_tags(sink: &RecordingSink) -> Vec<f32> {
        sink.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Point { at, .. } => Some(at.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_flush_ascending_order() {
        let mut queue = RenderQueue::new();
        queue.enqueue(marker(5, 5.0));
        queue.enqueue(marker(-3, -3.0));
        queue.enqueue(marker(0, 0.0));

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        assert_eq!(painted_tags(&sink), vec![-3.0, 0.0, 5.0]);
    }

    #[test]
    fn test_equal_order_values_keep_enqueue_order() {
        let mut queue = RenderQueue::new();
        queue.enqueue(marker(7, 1.0));
        queue.enqueue(marker(7, 2.0));
        queue.enqueue(marker(-1, 0.0));
        queue.enqueue(marker(7, 3.0));

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        assert_eq!(painted_tags(&sink), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_flush_empties_the_queue() {
        let mut queue = RenderQueue::new();
        queue.enqueue(marker(1, 1.0));
        assert_eq!(queue.len(), 1);

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        assert!(queue.is_empty());

        // A second flush paints nothing
        let mut second = RecordingSink::new();
        queue.flush(&mut second);
        assert!(second.ops.is_empty());
    }

    #[test]
    fn test_same_drawable_twice_paints_twice() {
        let mut queue = RenderQueue::new();
        let shared = marker(2, 9.0);
        queue.enqueue(shared.clone());
        queue.enqueue(shared);

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        assert_eq!(painted_tags(&sink), vec![9.0, 9.0]);
    }

    #[test]
    fn test_reserved_layers_bracket_world_objects() {
        struct Filler(i64);
        impl Drawable for Filler {
            fn order_value(&self) -> i64 {
                self.0
            }
            fn render_into(&self, sink: &mut dyn RasterSink) {
                let black = Color::new(0.0, 0.0, 0.0, 1.0);
                sink.fill_rect(Rect::new(self.0 as f32, 0.0, 1.0, 1.0), black);
            }
        }

        let mut queue = RenderQueue::new();
        queue.enqueue(Rc::new(Filler(order::ALWAYS_ON_TOP)));
        queue.enqueue(Rc::new(Filler(-1234)));
        queue.enqueue(Rc::new(Filler(order::OVERLAY)));
        queue.enqueue(Rc::new(Filler(order::ALWAYS_BEHIND)));

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        let xs: Vec<i64> = sink
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(rect.x as i64),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![order::ALWAYS_BEHIND, -1234, order::OVERLAY, order::ALWAYS_ON_TOP]);
    }

    #[test]
    fn test_clear_discards_without_painting() {
        let mut queue = RenderQueue::new();
        queue.enqueue(marker(1, 1.0));
        queue.clear();
        assert!(queue.is_empty());
    }
}

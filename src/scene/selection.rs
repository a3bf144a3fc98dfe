//! Mouse Selection
//!
//! Tracks a left-button drag: it begins on press, follows the cursor while
//! held, and ends on release. While a drag is in progress a thin outline
//! from the drag start to the cursor is drawn on top of everything.

use std::cell::Cell;
use std::rc::Rc;

use macroquad::color::{Color, WHITE};
use macroquad::math::Vec2;

use crate::game::{order, Binding, Component, ComponentError, Drawable, EntityHeader, Frame, Phase};
use crate::input::Mouse;
use crate::render::{RasterSink, Rect};

const BOX_COLOR: Color = WHITE;
const BOX_LINE: f32 = 1.0;

#[derive(Default)]
pub struct SelectionBox {
    selecting: bool,
    begin: Vec2,
    /// Last finished drag
    last: Option<Rect>,
    outline: Rc<SelectionOutline>,
}

#[derive(Default)]
struct SelectionOutline {
    rect: Cell<Rect>,
}

impl SelectionBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current drag, if any.
    pub fn current(&self) -> Option<Rect> {
        self.selecting.then(|| self.outline.rect.get())
    }

    /// The most recently completed drag.
    pub fn last_selection(&self) -> Option<Rect> {
        self.last
    }

    fn track_drag(
        &mut self,
        _entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        let input = frame.input;
        let cursor = input.cursor();

        if input.was_mouse_pressed(Mouse::Left) {
            self.selecting = true;
            self.begin = cursor;
        }

        if input.is_mouse_down(Mouse::Left) && self.selecting {
            self.outline.rect.set(Rect::from_corners(self.begin, cursor));
        }

        if input.was_mouse_released(Mouse::Left) && self.selecting {
            self.selecting = false;
            let rect = Rect::from_corners(self.begin, cursor);
            log::debug!("selected {:?}", rect);
            self.last = Some(rect);
        }
        Ok(())
    }

    fn draw(
        &mut self,
        _entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        if self.selecting {
            frame.queue.enqueue(self.outline.clone());
        }
        Ok(())
    }
}

impl Drawable for SelectionOutline {
    fn order_value(&self) -> i64 {
        order::ALWAYS_ON_TOP
    }

    fn render_into(&self, sink: &mut dyn RasterSink) {
        sink.stroke_rect(self.rect.get(), BOX_LINE, BOX_COLOR);
    }
}

impl Component for SelectionBox {
    const NAME: &'static str = "SelectionBox";
    const BINDINGS: &'static [Binding<Self>] = &[
        Binding { phase: Phase::UPDATE, name: "track_drag", handler: SelectionBox::track_drag },
        Binding { phase: Phase::DRAW, name: "draw", handler: SelectionBox::draw },
    ];
}

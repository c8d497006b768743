//! Canvas 2D wheel surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{WheelLayout, WheelSurface};
use crate::consts::*;
use crate::wheel::Status;

/// CSS class toggled on the status line while a winner is shown
const WINNER_CLASS: &str = "winner-pulse";

/// A wheel canvas plus its status line
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    status: Option<Element>,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement, status: Option<Element>) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        canvas.set_width(WHEEL_SIZE as u32);
        canvas.set_height(WHEEL_SIZE as u32);
        Some(Self {
            canvas,
            ctx,
            status,
        })
    }

    fn draw_placeholder(&self, text: &str) {
        let ctx = &self.ctx;
        let c = WHEEL_SIZE / 2.0;

        ctx.begin_path();
        ctx.arc(c, c, WHEEL_RADIUS, 0.0, std::f64::consts::TAU).ok();
        ctx.set_stroke_style_str("#666");
        ctx.set_line_width(2.0);
        ctx.stroke();

        ctx.set_fill_style_str("#888");
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("center");
        ctx.fill_text(text, c, c + LABEL_Y).ok();
    }

    fn draw_wedges(&self, wedges: &[super::Wedge]) {
        let ctx = &self.ctx;
        let c = WHEEL_SIZE / 2.0;

        for wedge in wedges {
            ctx.begin_path();
            ctx.set_fill_style_str(&wedge.fill_style());
            ctx.move_to(c, c);
            ctx.arc(
                c,
                c,
                WHEEL_RADIUS,
                wedge.start_deg.to_radians(),
                wedge.end_deg.to_radians(),
            )
            .ok();
            ctx.fill();
            ctx.set_stroke_style_str("#fff");
            ctx.set_line_width(1.0);
            ctx.stroke();

            // Label runs outward along the wedge's midline, flush to the rim
            ctx.save();
            ctx.translate(c, c).ok();
            ctx.rotate(wedge.mid_deg().to_radians()).ok();
            ctx.set_fill_style_str("white");
            ctx.set_font(LABEL_FONT);
            ctx.set_text_align("right");
            ctx.fill_text(&wedge.label, LABEL_X, LABEL_Y).ok();
            ctx.restore();
        }
    }
}

impl WheelSurface for CanvasSurface {
    fn draw(&mut self, layout: &WheelLayout) {
        self.ctx.clear_rect(0.0, 0.0, WHEEL_SIZE, WHEEL_SIZE);
        match layout {
            WheelLayout::Placeholder(text) => self.draw_placeholder(text),
            WheelLayout::Wedges(wedges) => self.draw_wedges(wedges),
        }
    }

    fn set_rotation(&mut self, degrees: f64) {
        let transform = format!("rotate({}deg)", degrees);
        if self
            .canvas
            .style()
            .set_property("transform", &transform)
            .is_err()
        {
            log::warn!("Failed to rotate wheel canvas");
        }
    }

    fn show_status(&mut self, status: &Status) {
        let Some(el) = &self.status else { return };
        el.set_text_content(Some(&status.to_string()));
        let classes = el.class_list();
        if status.is_winner() {
            let _ = classes.add_1(WINNER_CLASS);
        } else {
            let _ = classes.remove_1(WINNER_CLASS);
        }
    }
}

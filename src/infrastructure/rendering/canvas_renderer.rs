use crate::domain::{
    errors::InfrastructureError,
    logging::{LogComponent, get_logger},
    plot::{RenderCommand, RenderList, render::TextAnchor},
};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT_FAMILY: &str = "sans-serif";

/// Canvas 2D backend for [`RenderList`] - Infrastructure implementation
pub struct CanvasRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    pub fn new(canvas_id: String, width: u32, height: u32) -> Self {
        Self { canvas_id, width, height }
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn get_canvas_context(&self) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), InfrastructureError> {
        let fail = |what: &str| InfrastructureError::CanvasAccessFailed(format!("{} ({})", what, self.canvas_id));
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| fail("no document"))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| fail("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| fail("element is not a canvas"))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| fail("failed to get 2D context"))?
            .ok_or_else(|| fail("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| fail("failed to cast to 2D context"))?;

        Ok((canvas, context))
    }

    /// Clear the canvas and draw every command, translated by the list origin.
    pub fn render(&self, list: &RenderList) -> Result<(), InfrastructureError> {
        let (_canvas, context) = self.get_canvas_context()?;
        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        context.save();
        let drawn = context
            .translate(list.origin.x, list.origin.y)
            .and_then(|_| list.commands.iter().try_for_each(|cmd| self.draw(&context, cmd)));
        context.restore();
        drawn.map_err(|e| InfrastructureError::CanvasAccessFailed(format!("{:?}", e)))?;

        get_logger().trace(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("drew {} commands", list.commands.len()),
        );
        Ok(())
    }

    fn draw(&self, context: &CanvasRenderingContext2d, command: &RenderCommand) -> Result<(), JsValue> {
        match command {
            RenderCommand::Marker { cx, cy, r, fill, fill_opacity, stroke, stroke_width, .. } => {
                context.begin_path();
                context.arc(*cx, *cy, *r, 0.0, std::f64::consts::TAU)?;
                context.set_global_alpha(*fill_opacity);
                context.set_fill_style(&JsValue::from(fill.to_css()));
                context.fill();
                context.set_global_alpha(1.0);
                context.set_stroke_style(&JsValue::from(stroke.to_css()));
                context.set_line_width(*stroke_width);
                context.stroke();
            }
            RenderCommand::Line { x1, y1, x2, y2, stroke, stroke_width } => {
                context.begin_path();
                context.set_stroke_style(&JsValue::from(stroke.to_css()));
                context.set_line_width(*stroke_width);
                context.move_to(*x1, *y1);
                context.line_to(*x2, *y2);
                context.stroke();
            }
            RenderCommand::Text { x, y, text, font_size, color, anchor, bold, rotate } => {
                context.save();
                context.set_fill_style(&JsValue::from(color.to_css()));
                context.set_font(&font_spec(*font_size, *bold));
                context.set_text_align(text_align(*anchor));
                if *rotate != 0.0 {
                    context.rotate(rotate.to_radians())?;
                }
                let drawn = context.fill_text(text, *x, *y);
                context.restore();
                drawn?;
            }
            // Ticks are drawn through their Line/Text commands.
            RenderCommand::Tick { .. } => {}
        }
        Ok(())
    }
}

fn font_spec(size: f64, bold: bool) -> String {
    if bold {
        format!("bold {}px {}", size, FONT_FAMILY)
    } else {
        format!("{}px {}", size, FONT_FAMILY)
    }
}

fn text_align(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "center",
        TextAnchor::End => "end",
    }
}

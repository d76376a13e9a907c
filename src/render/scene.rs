use super::backend_err;
use crate::constants::{SCENE_DOT_RADIUS, SCENE_HALF_EXTENT, SCENE_REFLECTION_ALPHA};
use glam::Vec2;
use pulse_core::constants::{REFLECTION_Y_OFFSET, REFLECTION_Y_SCALE};
use pulse_core::{LayoutPoint, RenderError, Renderer, ShadowAggregate};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Dot {
    position: Vec2,
    css: String,
}

/// Canvas ring for frame playback, plus a mirrored copy underneath.
///
/// Dots are buffered between `begin_frame` and `end_frame` and painted in one
/// pass, so the canvas never shows a half-updated ring. The state rotation
/// applies to the main ring only; the reflection stays upright.
pub struct SceneRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    shape: (usize, usize),
    rotation: Vec2,
    reflection_alpha: f64,
    dots: Vec<Dot>,
}

impl SceneRenderer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("2d context: {:?}", e))?;
        Ok(Self {
            canvas,
            ctx,
            shape: (0, 0),
            rotation: Vec2::X,
            reflection_alpha: SCENE_REFLECTION_ALPHA,
            dots: Vec::new(),
        })
    }

    /// World → canvas pixels: origin at the centre, y up, fitted to the short side.
    fn to_canvas(&self, p: Vec2) -> (f64, f64) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let scale = w.min(h) / 2.0 / SCENE_HALF_EXTENT;
        (w / 2.0 + p.x as f64 * scale, h / 2.0 - p.y as f64 * scale)
    }

    fn fill_dot(&self, p: Vec2, css: &str) -> Result<(), RenderError> {
        let (x, y) = self.to_canvas(p);
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, SCENE_DOT_RADIUS, 0.0, TAU)
            .map_err(|e| backend_err("arc", e))?;
        self.ctx.set_fill_style_str(css);
        self.ctx.fill();
        Ok(())
    }

    fn paint(&self) -> Result<(), RenderError> {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        self.ctx.set_global_alpha(self.reflection_alpha);
        for d in &self.dots {
            let mirrored = Vec2::new(
                d.position.x,
                d.position.y * REFLECTION_Y_SCALE + REFLECTION_Y_OFFSET,
            );
            self.fill_dot(mirrored, &d.css)?;
        }

        self.ctx.set_global_alpha(1.0);
        for d in &self.dots {
            self.fill_dot(self.rotation.rotate(d.position), &d.css)?;
        }
        Ok(())
    }
}

impl Renderer for SceneRenderer {
    fn ensure_segments(&mut self, total_segments: usize, dot_count: usize) -> Result<(), RenderError> {
        if self.shape != (total_segments, dot_count) {
            self.shape = (total_segments, dot_count);
            self.dots = Vec::with_capacity(total_segments * dot_count);
            log::info!(
                "[scene] ring {} segments x {} dots",
                total_segments,
                dot_count
            );
        }
        Ok(())
    }

    fn update_dot(&mut self, point: &LayoutPoint) -> Result<(), RenderError> {
        let (segments, dot_count) = self.shape;
        if point.segment >= segments || point.dot >= dot_count {
            return Err(RenderError::MissingTarget {
                segment: point.segment,
                dot: point.dot,
            });
        }
        self.dots.push(Dot {
            position: point.position(),
            css: point.color.to_css(),
        });
        Ok(())
    }

    fn update_aggregate(&mut self, aggregate: &ShadowAggregate) -> Result<(), RenderError> {
        self.reflection_alpha = (aggregate.opacity as f64).clamp(0.0, 1.0);
        Ok(())
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = Vec2::from_angle(degrees.to_radians());
    }

    fn begin_frame(&mut self) {
        self.dots.clear();
    }

    fn end_frame(&mut self) {
        if let Err(e) = self.paint() {
            log::error!("[scene] paint failed: {}", e);
        }
    }
}

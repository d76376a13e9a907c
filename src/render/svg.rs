use super::backend_err;
use crate::constants::{DOT_RADIUS, SVG_NS};
use pulse_core::{LayoutPoint, RenderError, Renderer, ShadowAggregate};
use web_sys as web;

/// Dots as `<circle>`s under an SVG group, one rotated `<g>` per segment.
///
/// Each circle sits at `cx = 0` and only its `cy` moves, so the segment
/// group's `rotate()` carries the angle and per-tick updates touch two
/// attributes per dot.
pub struct SvgRenderer {
    document: web::Document,
    pattern: web::Element,
    ring: Option<web::Element>,
    shadow: Option<web::Element>,
    // segment-major: index = segment * dot_count + dot
    dots: Vec<web::Element>,
    shape: (usize, usize),
}

impl SvgRenderer {
    pub fn new(
        document: web::Document,
        pattern: web::Element,
        shadow: Option<web::Element>,
    ) -> Self {
        Self {
            document,
            pattern,
            ring: None,
            shadow,
            dots: Vec::new(),
            shape: (0, 0),
        }
    }

    fn create(&self, tag: &str) -> Result<web::Element, RenderError> {
        self.document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(|e| backend_err("createElementNS", e))
    }

    fn build(&mut self, total_segments: usize, dot_count: usize) -> Result<(), RenderError> {
        self.pattern.set_inner_html("");
        self.dots.clear();
        self.dots.reserve(total_segments * dot_count);

        let ring = self.create("g")?;
        let step = 360.0 / total_segments as f32;
        for i in 0..total_segments {
            let group = self.create("g")?;
            let _ = group.set_attribute("class", &format!("line-group-{}", i));
            let _ = group.set_attribute("transform", &format!("rotate({})", i as f32 * step));
            for _ in 0..dot_count {
                let dot = self.create("circle")?;
                let _ = dot.set_attribute("cx", "0");
                let _ = dot.set_attribute("cy", "0");
                let _ = dot.set_attribute("r", &DOT_RADIUS.to_string());
                group
                    .append_child(&dot)
                    .map_err(|e| backend_err("appendChild", e))?;
                self.dots.push(dot);
            }
            ring.append_child(&group)
                .map_err(|e| backend_err("appendChild", e))?;
        }
        self.pattern
            .append_child(&ring)
            .map_err(|e| backend_err("appendChild", e))?;
        self.ring = Some(ring);
        self.shape = (total_segments, dot_count);
        log::info!(
            "[svg] built {} segments x {} dots",
            total_segments,
            dot_count
        );
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn ensure_segments(&mut self, total_segments: usize, dot_count: usize) -> Result<(), RenderError> {
        if self.shape == (total_segments, dot_count) && self.ring.is_some() {
            return Ok(());
        }
        self.build(total_segments, dot_count)
    }

    fn update_dot(&mut self, point: &LayoutPoint) -> Result<(), RenderError> {
        let (_, dot_count) = self.shape;
        let missing = RenderError::MissingTarget {
            segment: point.segment,
            dot: point.dot,
        };
        if point.dot >= dot_count {
            return Err(missing);
        }
        let el = self
            .dots
            .get(point.segment * dot_count + point.dot)
            .ok_or(missing)?;
        let _ = el.set_attribute("cy", &point.distance.to_string());
        let _ = el.set_attribute("fill", &point.color.to_css());
        Ok(())
    }

    fn update_aggregate(&mut self, aggregate: &ShadowAggregate) -> Result<(), RenderError> {
        if let Some(shadow) = &self.shadow {
            let _ = shadow.set_attribute("stroke-width", &aggregate.stroke_width.to_string());
            let _ = shadow.set_attribute("opacity", &aggregate.opacity.to_string());
        }
        Ok(())
    }

    fn set_rotation(&mut self, degrees: f32) {
        if let Some(ring) = &self.ring {
            let _ = ring.set_attribute("transform", &format!("rotate({})", degrees));
        }
    }
}

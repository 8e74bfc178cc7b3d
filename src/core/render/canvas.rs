//! HTML5 Canvas serializer for morph shapes
//!
//! The exporter walks the start and end shapes in lockstep and emits a
//! JavaScript draw function in which every coordinate, width and colour is a
//! `(start, end)` pair blended at draw time by the `canvas.js` runtime.
//! Geometry is shifted by a [`CoordinateOffset`] and divided by the unit
//! divisor, so the page never draws at negative coordinates.

use crate::core::bounds::CoordinateOffset;
use crate::domain::errors::EncodingError;
use crate::domain::geometry::{format_number, ColorTransform, Rect, Rgba};
use crate::domain::{CharacterId, FillStyle, GradientStop, PathCommand, Shape};
use std::fmt::Write;

/// Shared runtime referenced by every Canvas page
pub const CANVAS_RUNTIME_FILE: &str = "canvas.js";

/// Runtime helpers, written once per Canvas export
pub const CANVAS_RUNTIME: &[u8] = include_bytes!("../../../resources/canvas.js");

/// Builds the drawing instructions and HTML page for one morph shape
pub struct CanvasMorphShapeExporter {
    character_id: CharacterId,
    start: Shape,
    end: Shape,
    color_transform: ColorTransform,
    unit_divisor: f64,
    offset: CoordinateOffset,
    instructions: Option<String>,
}

impl CanvasMorphShapeExporter {
    pub fn new(
        character_id: CharacterId,
        start: Shape,
        end: Shape,
        color_transform: ColorTransform,
        unit_divisor: f64,
        offset: CoordinateOffset,
    ) -> Self {
        Self {
            character_id,
            start,
            end,
            color_transform,
            unit_divisor,
            offset,
            instructions: None,
        }
    }

    /// Generates the draw function; must run before [`Self::get_html`]
    pub fn export(&mut self) -> Result<(), EncodingError> {
        if self.start.paths.len() != self.end.paths.len() {
            return Err(EncodingError::PathCountMismatch {
                character_id: self.character_id.get(),
                start: self.start.paths.len(),
                end: self.end.paths.len(),
            });
        }

        let mut js = String::new();
        js.push_str("function drawMorphShape(ctx, ratio) {\n");
        js.push_str("\tvar m = function (a, b) { return morphValue(a, b, ratio); };\n");

        for (index, (start, end)) in self.start.paths.iter().zip(&self.end.paths).enumerate() {
            if start.commands.len() != end.commands.len() {
                return Err(self.edge_mismatch(index, "edge counts differ"));
            }

            js.push_str("\tctx.beginPath();\n");
            for (s, e) in start.commands.iter().zip(&end.commands) {
                self.write_command(&mut js, s, e)
                    .ok_or_else(|| self.edge_mismatch(index, "edge kinds differ"))?;
            }

            if let Some(fill) = start.fill_style {
                let (from, to) = (&self.start.fill_styles[fill], &self.end.fill_styles[fill]);
                let style = self
                    .fill_expression(from, to)
                    .ok_or_else(|| self.edge_mismatch(index, "fill styles differ in kind"))?;
                let _ = writeln!(js, "\tctx.fillStyle = {style};");
                js.push_str("\tctx.fill(\"evenodd\");\n");
            }

            if let Some(line) = start.line_style {
                let (from, to) = (&self.start.line_styles[line], &self.end.line_styles[line]);
                let _ = writeln!(
                    js,
                    "\tctx.lineWidth = m({}, {});",
                    self.length(from.width),
                    self.length(to.width)
                );
                let _ = writeln!(
                    js,
                    "\tctx.strokeStyle = morphColor({}, {}, ratio);",
                    self.color(from.color),
                    self.color(to.color)
                );
                js.push_str("\tctx.lineCap = \"round\";\n\tctx.lineJoin = \"round\";\n");
                js.push_str("\tctx.stroke();\n");
            }
        }
        js.push_str("}\n");

        self.instructions = Some(js);
        Ok(())
    }

    /// Complete page embedding `library` and the draw function
    pub fn get_html(&self, library: &str) -> String {
        let bounds = self.start.bounds.union(&self.end.bounds);
        let width = self.extent(bounds.x_max, self.offset.delta_x);
        let height = self.extent(bounds.y_max, self.offset.delta_y);
        let instructions = self.instructions.as_deref().unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Morph shape {id}</title>\n\
             <script src=\"{runtime}\"></script>\n\
             </head>\n\
             <body>\n\
             <canvas id=\"morphshape\" width=\"{width}\" height=\"{height}\"></canvas>\n\
             <script>\n\
             {library}\
             {instructions}\
             startMorph(document.getElementById(\"morphshape\"), drawMorphShape, library);\n\
             </script>\n\
             </body>\n\
             </html>\n",
            id = self.character_id,
            runtime = CANVAS_RUNTIME_FILE,
        )
    }

    fn edge_mismatch(&self, path: usize, reason: &str) -> EncodingError {
        EncodingError::EdgeMismatch {
            character_id: self.character_id.get(),
            path,
            reason: reason.to_string(),
        }
    }

    fn write_command(&self, js: &mut String, start: &PathCommand, end: &PathCommand) -> Option<()> {
        match (*start, *end) {
            (PathCommand::MoveTo { x, y }, PathCommand::MoveTo { x: ex, y: ey }) => {
                let (px, py) = self.point((x, y), (ex, ey));
                let _ = writeln!(js, "\tctx.moveTo({px}, {py});");
            }
            (PathCommand::LineTo { x, y }, PathCommand::LineTo { x: ex, y: ey }) => {
                let (px, py) = self.point((x, y), (ex, ey));
                let _ = writeln!(js, "\tctx.lineTo({px}, {py});");
            }
            (
                PathCommand::CurveTo { cx, cy, x, y },
                PathCommand::CurveTo {
                    cx: ecx,
                    cy: ecy,
                    x: ex,
                    y: ey,
                },
            ) => {
                let (qx, qy) = self.point((cx, cy), (ecx, ecy));
                let (px, py) = self.point((x, y), (ex, ey));
                let _ = writeln!(js, "\tctx.quadraticCurveTo({qx}, {qy}, {px}, {py});");
            }
            _ => return None,
        }
        Some(())
    }

    /// `m(start, end)` expressions for one anchor
    fn point(&self, start: (i32, i32), end: (i32, i32)) -> (String, String) {
        let (sx, sy) = self.offset.apply(start.0, start.1);
        let (ex, ey) = self.offset.apply(end.0, end.1);
        (
            format!("m({}, {})", self.unit(sx), self.unit(ex)),
            format!("m({}, {})", self.unit(sy), self.unit(ey)),
        )
    }

    fn unit(&self, twips: i64) -> String {
        format_number(twips as f64 / self.unit_divisor)
    }

    fn length(&self, twips: u16) -> String {
        format_number(f64::from(twips) / self.unit_divisor)
    }

    fn extent(&self, max: i32, delta: i64) -> i64 {
        ((i64::from(max) + delta) as f64 / self.unit_divisor).ceil() as i64
    }

    /// `[r, g, b, alpha]` literal after the colour transform
    fn color(&self, color: Rgba) -> String {
        let c = self.color_transform.apply(color);
        format!("[{}, {}, {}, {}]", c.r, c.g, c.b, format_number(c.opacity()))
    }

    fn fill_expression(&self, start: &FillStyle, end: &FillStyle) -> Option<String> {
        match (start, end) {
            (FillStyle::Solid { color }, FillStyle::Solid { color: end_color }) => Some(format!(
                "morphColor({}, {}, ratio)",
                self.color(*color),
                self.color(*end_color)
            )),
            (
                FillStyle::LinearGradient { stops },
                FillStyle::LinearGradient { stops: end_stops },
            ) => Some(self.gradient("linear", stops, end_stops)),
            (
                FillStyle::RadialGradient { stops },
                FillStyle::RadialGradient { stops: end_stops },
            ) => Some(self.gradient("radial", stops, end_stops)),
            (
                FillStyle::Bitmap {
                    bitmap_id,
                    smoothed,
                },
                FillStyle::Bitmap { .. },
            ) => Some(format!("bitmapPattern(ctx, {bitmap_id}, {smoothed})")),
            _ => None,
        }
    }

    /// Gradient spanning the shape bounds horizontally through their centre
    fn gradient(&self, kind: &str, stops: &[GradientStop], end_stops: &[GradientStop]) -> String {
        let axis = |bounds: &Rect| {
            let mid_y = ((i64::from(bounds.y_min) + i64::from(bounds.y_max)) / 2) as i32;
            ((bounds.x_min, mid_y), (bounds.x_max, mid_y))
        };
        let (start_from, start_to) = axis(&self.start.bounds);
        let (end_from, end_to) = axis(&self.end.bounds);
        let (x0, y0) = self.point(start_from, end_from);
        let (x1, y1) = self.point(start_to, end_to);

        let stops = stops
            .iter()
            .zip(end_stops)
            .map(|(s, e)| {
                format!(
                    "[{}, {}, {}, {}]",
                    format_number(f64::from(s.ratio) / 255.0),
                    format_number(f64::from(e.ratio) / 255.0),
                    self.color(s.color),
                    self.color(e.color)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("morphGradient(ctx, \"{kind}\", {x0}, {y0}, {x1}, {y1}, [{stops}], ratio)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineStyle, Path, UNIT_DIVISOR};

    fn triangle(scale: i32, color: Rgba) -> Shape {
        Shape {
            bounds: Rect::new(-20 * scale, 20 * scale, -20 * scale, 20 * scale),
            fill_styles: vec![FillStyle::Solid { color }],
            line_styles: vec![LineStyle {
                width: 20 * scale as u16,
                color: Rgba::new(0, 0, 0, 255),
            }],
            paths: vec![Path {
                fill_style: Some(0),
                line_style: Some(0),
                commands: vec![
                    PathCommand::MoveTo {
                        x: -20 * scale,
                        y: -20 * scale,
                    },
                    PathCommand::LineTo {
                        x: 20 * scale,
                        y: 0,
                    },
                    PathCommand::CurveTo {
                        cx: 0,
                        cy: 20 * scale,
                        x: -20 * scale,
                        y: 20 * scale,
                    },
                ],
            }],
        }
    }

    fn exporter(start: Shape, end: Shape) -> CanvasMorphShapeExporter {
        let offset = CoordinateOffset::between(&start.bounds, &end.bounds);
        CanvasMorphShapeExporter::new(
            CharacterId::new(3),
            start,
            end,
            ColorTransform::IDENTITY,
            UNIT_DIVISOR,
            offset,
        )
    }

    #[test]
    fn test_export_emits_offset_morph_pairs() {
        let mut canvas = exporter(
            triangle(1, Rgba::new(255, 0, 0, 255)),
            triangle(2, Rgba::new(0, 0, 255, 128)),
        );
        canvas.export().unwrap();
        let html = canvas.get_html("var library = {};\n");

        // offset is 40 twips on both axes
        assert!(html.contains("ctx.moveTo(m(1, 0), m(1, 0));"));
        assert!(html.contains("ctx.lineTo(m(3, 4), m(2, 2));"));
        assert!(html.contains("ctx.quadraticCurveTo(m(2, 2), m(3, 4), m(1, 0), m(3, 4));"));
        assert!(html.contains(
            "ctx.fillStyle = morphColor([255, 0, 0, 1], [0, 0, 255, 0.502], ratio);"
        ));
        assert!(html.contains("ctx.lineWidth = m(1, 2);"));
        assert!(html.contains("width=\"4\" height=\"4\""));
        assert!(html.contains("<script src=\"canvas.js\"></script>"));
        assert!(html.contains("var library = {};\nfunction drawMorphShape(ctx, ratio) {"));
    }

    #[test]
    fn test_gradient_and_bitmap_fills() {
        let mut start = triangle(1, Rgba::new(0, 0, 0, 255));
        let mut end = triangle(1, Rgba::new(0, 0, 0, 255));
        let stop = GradientStop {
            ratio: 0,
            color: Rgba::new(0, 0, 0, 255),
        };
        start.fill_styles = vec![FillStyle::RadialGradient { stops: vec![stop] }];
        end.fill_styles = vec![FillStyle::RadialGradient {
            stops: vec![GradientStop { ratio: 255, ..stop }],
        }];

        let mut canvas = exporter(start.clone(), end.clone());
        canvas.export().unwrap();
        assert!(canvas
            .get_html("")
            .contains("morphGradient(ctx, \"radial\", m(0, 0), m(1, 1), m(2, 2), m(1, 1), [[0, 1, [0, 0, 0, 1], [0, 0, 0, 1]]], ratio)"));

        let bitmap = FillStyle::Bitmap {
            bitmap_id: CharacterId::new(7),
            smoothed: true,
        };
        start.fill_styles = vec![bitmap.clone()];
        end.fill_styles = vec![bitmap];
        let mut canvas = exporter(start, end);
        canvas.export().unwrap();
        assert!(canvas
            .get_html("")
            .contains("ctx.fillStyle = bitmapPattern(ctx, 7, true);"));
    }

    #[test]
    fn test_mismatched_shapes_are_rejected() {
        let start = triangle(1, Rgba::new(0, 0, 0, 255));
        let mut end = start.clone();
        end.paths[0].commands.pop();

        let err = exporter(start, end).export().unwrap_err();
        assert!(matches!(err, EncodingError::EdgeMismatch { path: 0, .. }));
    }

    #[test]
    fn test_runtime_defines_helpers() {
        let runtime = std::str::from_utf8(CANVAS_RUNTIME).unwrap();
        for helper in ["morphValue", "morphColor", "morphGradient", "bitmapPattern", "startMorph"] {
            assert!(runtime.contains(&format!("function {helper}(")), "{helper}");
        }
    }
}

//! SVG serializer for morph shapes
//!
//! The exporter is framed by an [`ExportRectangle`] (native bounds times
//! zoom) and accumulates `<defs>` and body markup until [`SvgExporter::get_svg`]
//! assembles the document. Rendering at [`RatioMarker::Animated`] draws the
//! start state and attaches SMIL `<animate>` elements that morph path data,
//! colours and stroke widths towards the end state.
//!
//! Bitmap fills are inlined as `<pattern>` definitions holding a `data:` URI,
//! so the document needs no external files.
//!
//! Output is pure string building and fully deterministic: definition ids are
//! numbered in paint order and numbers go through [`format_number`].

use crate::core::bounds::ExportRectangle;
use crate::domain::errors::EncodingError;
use crate::domain::geometry::{format_number, ColorTransform, Rgba, UNIT_DIVISOR};
use crate::domain::morph::PairedPath;
use crate::domain::{
    CharacterId, Document, FillStyle, GradientStop, LineStyle, MorphShapeRecord, PathCommand,
    Shape, Tag,
};
use std::fmt::Write;

/// Length of one morph cycle in animated output
const MORPH_DURATION_SECONDS: f64 = 2.0;

/// Frame rate used to turn a frame index into an animation start time
const FRAME_RATE: f64 = 24.0;

/// Which state of the morph to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioMarker {
    /// Start state animated towards the end state
    Animated,
    /// Static snapshot at the given ratio
    Fixed(u16),
}

/// Accumulates SVG markup for one artifact
pub struct SvgExporter {
    rect: ExportRectangle,
    defs: String,
    body: String,
    def_count: usize,
}

impl SvgExporter {
    pub fn new(rect: ExportRectangle) -> Self {
        Self {
            rect,
            defs: String::new(),
            body: String::new(),
            def_count: 0,
        }
    }

    /// Assembles the complete document
    pub fn get_svg(&self) -> String {
        let width = format_number(self.rect.width() / UNIT_DIVISOR);
        let height = format_number(self.rect.height() / UNIT_DIVISOR);

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        if !self.defs.is_empty() {
            svg.push_str("<defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("</defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn next_def_id(&mut self, prefix: &str) -> String {
        self.def_count += 1;
        format!("{prefix}{}", self.def_count)
    }
}

/// Renders `record` into `exporter`
///
/// Bitmaps referenced by fill styles are looked up in `document` and inlined
/// as data URIs. `zoom` scales geometry the same way the exporter's rectangle
/// was scaled; `frame` offsets the animation start when `marker` is
/// [`RatioMarker::Animated`].
pub fn morph_shape_to_svg(
    exporter: &mut SvgExporter,
    record: &MorphShapeRecord,
    document: &Document,
    marker: RatioMarker,
    color_transform: &ColorTransform,
    frame: u32,
    zoom: f64,
) -> Result<(), EncodingError> {
    let coords = SvgCoordinates::new(&exporter.rect, zoom);

    match marker {
        RatioMarker::Fixed(ratio) => {
            let shape = record.shape_at_ratio(ratio)?;
            write_static_shape(exporter, document, &shape, color_transform, &coords)?;
        }
        RatioMarker::Animated => {
            let start = record.shape_at_ratio(0)?;
            let end = record.shape_at_ratio(record.max_ratio())?;
            let pairs = record.paired_paths()?;
            let timing = Timing {
                begin: f64::from(frame) / FRAME_RATE,
            };
            write_animated_shape(
                exporter,
                document,
                &pairs,
                (&start, &end),
                color_transform,
                &coords,
                &timing,
            )?;
        }
    }
    Ok(())
}

/// Maps twips to output units for one exporter
struct SvgCoordinates {
    scale: f64,
    origin_x: f64,
    origin_y: f64,
}

impl SvgCoordinates {
    fn new(rect: &ExportRectangle, zoom: f64) -> Self {
        Self {
            scale: zoom / UNIT_DIVISOR,
            origin_x: rect.x_min / UNIT_DIVISOR,
            origin_y: rect.y_min / UNIT_DIVISOR,
        }
    }

    fn x(&self, x: i32) -> String {
        format_number(f64::from(x) * self.scale - self.origin_x)
    }

    fn y(&self, y: i32) -> String {
        format_number(f64::from(y) * self.scale - self.origin_y)
    }

    fn length(&self, twips: u16) -> String {
        format_number(f64::from(twips) * self.scale)
    }

    fn path_data<'a>(&self, commands: impl Iterator<Item = &'a PathCommand>) -> String {
        let mut data = String::new();
        for command in commands {
            if !data.is_empty() {
                data.push(' ');
            }
            match *command {
                PathCommand::MoveTo { x, y } => {
                    let _ = write!(data, "M {} {}", self.x(x), self.y(y));
                }
                PathCommand::LineTo { x, y } => {
                    let _ = write!(data, "L {} {}", self.x(x), self.y(y));
                }
                PathCommand::CurveTo { cx, cy, x, y } => {
                    let _ = write!(
                        data,
                        "Q {} {} {} {}",
                        self.x(cx),
                        self.y(cy),
                        self.x(x),
                        self.y(y)
                    );
                }
            }
        }
        data
    }
}

struct Timing {
    begin: f64,
}

impl Timing {
    fn animate(&self, attribute: &str, from: &str, to: &str) -> String {
        format!(
            "<animate attributeName=\"{attribute}\" values=\"{from};{to}\" dur=\"{}s\" begin=\"{}s\" repeatCount=\"indefinite\"/>",
            format_number(MORPH_DURATION_SECONDS),
            format_number(self.begin)
        )
    }
}

fn write_static_shape(
    exporter: &mut SvgExporter,
    document: &Document,
    shape: &Shape,
    color_transform: &ColorTransform,
    coords: &SvgCoordinates,
) -> Result<(), EncodingError> {
    for path in &shape.paths {
        let d = coords.path_data(path.commands.iter());
        let fill = match path.fill_style.map(|i| &shape.fill_styles[i]) {
            Some(style) => {
                fill_attributes(exporter, document, style, None, color_transform, None)?
            }
            None => "fill=\"none\"".to_string(),
        };
        let stroke = path
            .line_style
            .map(|i| stroke_attributes(&shape.line_styles[i], color_transform, coords))
            .unwrap_or_default();

        let _ = writeln!(exporter.body, "<path d=\"{d}\" {fill}{stroke}/>");
    }
    Ok(())
}

fn write_animated_shape(
    exporter: &mut SvgExporter,
    document: &Document,
    pairs: &[PairedPath],
    (start, end): (&Shape, &Shape),
    color_transform: &ColorTransform,
    coords: &SvgCoordinates,
    timing: &Timing,
) -> Result<(), EncodingError> {
    for pair in pairs {
        let start_d = coords.path_data(pair.start());
        let end_d = coords.path_data(pair.end());
        let mut animations = vec![timing.animate("d", &start_d, &end_d)];

        let fill = match pair.fill_style {
            Some(i) => fill_attributes(
                exporter,
                document,
                &start.fill_styles[i],
                Some(&end.fill_styles[i]),
                color_transform,
                Some((timing, &mut animations)),
            )?,
            None => "fill=\"none\"".to_string(),
        };

        let stroke = match pair.line_style {
            Some(i) => {
                let (from, to) = (&start.line_styles[i], &end.line_styles[i]);
                let from_color = color_transform.apply(from.color);
                let to_color = color_transform.apply(to.color);
                if from_color != to_color {
                    animations.push(timing.animate(
                        "stroke",
                        &from_color.to_hex(),
                        &to_color.to_hex(),
                    ));
                }
                if from.width != to.width {
                    animations.push(timing.animate(
                        "stroke-width",
                        &coords.length(from.width),
                        &coords.length(to.width),
                    ));
                }
                stroke_attributes(from, color_transform, coords)
            }
            None => String::new(),
        };

        let _ = writeln!(exporter.body, "<path d=\"{start_d}\" {fill}{stroke}>");
        for animation in animations {
            let _ = writeln!(exporter.body, "  {animation}");
        }
        exporter.body.push_str("</path>\n");
    }
    Ok(())
}

/// Fill attributes for `style`; gradients and bitmap patterns are added to
/// the exporter's defs. With an `end` style and a timing, colour changes
/// become animations.
fn fill_attributes(
    exporter: &mut SvgExporter,
    document: &Document,
    style: &FillStyle,
    end: Option<&FillStyle>,
    color_transform: &ColorTransform,
    animated: Option<(&Timing, &mut Vec<String>)>,
) -> Result<String, EncodingError> {
    let attributes = match style {
        FillStyle::Solid { color } => {
            let color = color_transform.apply(*color);
            if let (Some(FillStyle::Solid { color: end_color }), Some((timing, animations))) =
                (end, animated)
            {
                let end_color = color_transform.apply(*end_color);
                if end_color != color {
                    animations.push(timing.animate("fill", &color.to_hex(), &end_color.to_hex()));
                }
                if end_color.a != color.a {
                    animations.push(timing.animate(
                        "fill-opacity",
                        &format_number(color.opacity()),
                        &format_number(end_color.opacity()),
                    ));
                }
            }
            solid_fill(color)
        }
        FillStyle::LinearGradient { stops } | FillStyle::RadialGradient { stops } => {
            let id = exporter.next_def_id("gradient");
            let end_stops = match end {
                Some(FillStyle::LinearGradient { stops: e })
                | Some(FillStyle::RadialGradient { stops: e }) => Some(e.as_slice()),
                _ => None,
            };
            let timing = animated.map(|(timing, _)| timing);
            let element = if matches!(style, FillStyle::LinearGradient { .. }) {
                "linearGradient"
            } else {
                "radialGradient"
            };
            let _ = writeln!(exporter.defs, "<{element} id=\"{id}\">");
            for (index, stop) in stops.iter().enumerate() {
                let end_stop = end_stops.and_then(|e| e.get(index));
                write_gradient_stop(&mut exporter.defs, stop, end_stop, color_transform, timing);
            }
            let _ = writeln!(exporter.defs, "</{element}>");
            format!("fill=\"url(#{id})\"")
        }
        FillStyle::Bitmap {
            bitmap_id,
            smoothed,
        } => {
            let id = write_bitmap_pattern(exporter, document, *bitmap_id, *smoothed)?;
            format!("fill=\"url(#{id})\"")
        }
    };
    Ok(attributes)
}

/// Adds a pattern stretching bitmap `bitmap_id` over the filled path's
/// bounding box and returns its id
fn write_bitmap_pattern(
    exporter: &mut SvgExporter,
    document: &Document,
    bitmap_id: CharacterId,
    smoothed: bool,
) -> Result<String, EncodingError> {
    let bitmap = match document.character(bitmap_id) {
        Some(Tag::Bitmap(bitmap)) => bitmap,
        _ => return Err(EncodingError::UnknownCharacter(bitmap_id.get())),
    };

    let id = exporter.next_def_id("bitmap");
    let rendering = if smoothed {
        ""
    } else {
        " image-rendering=\"optimizeSpeed\""
    };
    let _ = writeln!(
        exporter.defs,
        "<pattern id=\"{id}\" patternContentUnits=\"objectBoundingBox\" width=\"1\" height=\"1\">"
    );
    let _ = writeln!(
        exporter.defs,
        "  <image href=\"{}\" width=\"1\" height=\"1\" preserveAspectRatio=\"none\"{rendering}/>",
        bitmap.data_uri()
    );
    exporter.defs.push_str("</pattern>\n");
    Ok(id)
}

fn write_gradient_stop(
    defs: &mut String,
    stop: &GradientStop,
    end: Option<&GradientStop>,
    color_transform: &ColorTransform,
    timing: Option<&Timing>,
) {
    let color = color_transform.apply(stop.color);
    let offset = format_number(f64::from(stop.ratio) / 255.0);
    let attributes = format!(
        "offset=\"{offset}\" stop-color=\"{}\" stop-opacity=\"{}\"",
        color.to_hex(),
        format_number(color.opacity())
    );

    let mut animations = Vec::new();
    if let (Some(end), Some(timing)) = (end, timing) {
        let end_color = color_transform.apply(end.color);
        if end.ratio != stop.ratio {
            animations.push(timing.animate(
                "offset",
                &offset,
                &format_number(f64::from(end.ratio) / 255.0),
            ));
        }
        if end_color != color {
            animations.push(timing.animate("stop-color", &color.to_hex(), &end_color.to_hex()));
        }
    }

    if animations.is_empty() {
        let _ = writeln!(defs, "  <stop {attributes}/>");
    } else {
        let _ = writeln!(defs, "  <stop {attributes}>");
        for animation in animations {
            let _ = writeln!(defs, "    {animation}");
        }
        defs.push_str("  </stop>\n");
    }
}

fn solid_fill(color: Rgba) -> String {
    if color.a == 255 {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            color.to_hex(),
            format_number(color.opacity())
        )
    }
}

fn stroke_attributes(
    style: &LineStyle,
    color_transform: &ColorTransform,
    coords: &SvgCoordinates,
) -> String {
    let color = color_transform.apply(style.color);
    let mut attributes = format!(
        " stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"",
        color.to_hex(),
        coords.length(style.width)
    );
    if color.a != 255 {
        let _ = write!(
            attributes,
            " stroke-opacity=\"{}\"",
            format_number(color.opacity())
        );
    }
    attributes
}

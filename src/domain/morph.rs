//! Morph shape records
//!
//! A morph shape stores two outlines, a start and an end state, over one set
//! of morph styles. Renderers sample it at a ratio in `0..=MAX_RATIO`, where 0
//! is the start state and [`MAX_RATIO`] the end state.
//!
//! Start and end paths pair up one-to-one. Within a pair, a straight edge may
//! face a curved edge; the straight edge is then promoted to a curve whose
//! control point sits on the segment midpoint so both sides interpolate
//! uniformly.

use super::errors::EncodingError;
use super::geometry::{lerp_u8, Point, Rect, Rgba, MAX_RATIO};
use super::ids::CharacterId;
use super::shape::{
    check_style_indices, FillStyle, GradientStop, LineStyle, Path, PathCommand, Shape,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gradient stop with separate start and end positions and colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphGradientStop {
    pub start_ratio: u8,
    pub end_ratio: u8,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl MorphGradientStop {
    fn at(&self, ratio: u16) -> GradientStop {
        GradientStop {
            ratio: lerp_u8(self.start_ratio, self.end_ratio, ratio),
            color: self.start_color.lerp(&self.end_color, ratio),
        }
    }
}

/// Fill style of a morph shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MorphFillStyle {
    Solid {
        start_color: Rgba,
        end_color: Rgba,
    },
    LinearGradient {
        stops: Vec<MorphGradientStop>,
    },
    RadialGradient {
        stops: Vec<MorphGradientStop>,
    },
    Bitmap {
        bitmap_id: CharacterId,
        #[serde(default)]
        smoothed: bool,
    },
}

impl MorphFillStyle {
    /// Resolves the style at `ratio`
    pub fn at(&self, ratio: u16) -> FillStyle {
        match self {
            MorphFillStyle::Solid {
                start_color,
                end_color,
            } => FillStyle::Solid {
                color: start_color.lerp(end_color, ratio),
            },
            MorphFillStyle::LinearGradient { stops } => FillStyle::LinearGradient {
                stops: stops.iter().map(|s| s.at(ratio)).collect(),
            },
            MorphFillStyle::RadialGradient { stops } => FillStyle::RadialGradient {
                stops: stops.iter().map(|s| s.at(ratio)).collect(),
            },
            MorphFillStyle::Bitmap {
                bitmap_id,
                smoothed,
            } => FillStyle::Bitmap {
                bitmap_id: *bitmap_id,
                smoothed: *smoothed,
            },
        }
    }
}

/// Line style of a morph shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphLineStyle {
    pub start_width: u16,
    pub end_width: u16,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl MorphLineStyle {
    pub fn at(&self, ratio: u16) -> LineStyle {
        let width = i64::from(self.start_width)
            + (i64::from(self.end_width) - i64::from(self.start_width)) * i64::from(ratio)
                / i64::from(MAX_RATIO);
        LineStyle {
            width: width as u16,
            color: self.start_color.lerp(&self.end_color, ratio),
        }
    }
}

/// A morph shape character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphShapeRecord {
    pub character_id: CharacterId,
    #[serde(default)]
    pub name: Option<String>,
    pub start_bounds: Rect,
    pub end_bounds: Rect,
    #[serde(default)]
    pub fill_styles: Vec<MorphFillStyle>,
    #[serde(default)]
    pub line_styles: Vec<MorphLineStyle>,
    pub start_paths: Vec<Path>,
    pub end_paths: Vec<Path>,
}

/// A start/end path pair with edges already matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedPath {
    pub fill_style: Option<usize>,
    pub line_style: Option<usize>,
    pub commands: Vec<(PathCommand, PathCommand)>,
}

impl PairedPath {
    /// Start-state commands
    pub fn start(&self) -> impl Iterator<Item = &PathCommand> {
        self.commands.iter().map(|(start, _)| start)
    }

    /// End-state commands
    pub fn end(&self) -> impl Iterator<Item = &PathCommand> {
        self.commands.iter().map(|(_, end)| end)
    }
}

impl MorphShapeRecord {
    /// Ratio at which the shape is fully in its end state
    pub const fn max_ratio(&self) -> u16 {
        MAX_RATIO
    }

    /// Native rectangle covering both states
    pub fn rect(&self) -> Rect {
        self.start_bounds.union(&self.end_bounds)
    }

    /// Name shown in progress events and listings
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("DefineMorphShape ({}: {})", self.character_id, name),
            None => format!("DefineMorphShape ({})", self.character_id),
        }
    }

    /// Adds every character referenced by this shape's fill styles
    pub fn needed_characters(&self, needed: &mut BTreeSet<CharacterId>) {
        for style in &self.fill_styles {
            if let MorphFillStyle::Bitmap { bitmap_id, .. } = style {
                needed.insert(*bitmap_id);
            }
        }
    }

    /// Checks the record can be rendered: styles exist and edges pair up
    pub fn validate(&self) -> Result<(), EncodingError> {
        self.paired_paths().map(|_| ())
    }

    /// Matches start and end paths edge by edge
    pub fn paired_paths(&self) -> Result<Vec<PairedPath>, EncodingError> {
        let id = self.character_id;
        if self.start_paths.len() != self.end_paths.len() {
            return Err(EncodingError::PathCountMismatch {
                character_id: id.get(),
                start: self.start_paths.len(),
                end: self.end_paths.len(),
            });
        }
        check_style_indices(
            id,
            &self.start_paths,
            self.fill_styles.len(),
            self.line_styles.len(),
        )?;

        self.start_paths
            .iter()
            .zip(&self.end_paths)
            .enumerate()
            .map(|(index, (start, end))| {
                if start.fill_style != end.fill_style || start.line_style != end.line_style {
                    return Err(EncodingError::EdgeMismatch {
                        character_id: id.get(),
                        path: index,
                        reason: "start and end use different styles".to_string(),
                    });
                }
                let commands = pair_commands(&start.commands, &end.commands).map_err(|reason| {
                    EncodingError::EdgeMismatch {
                        character_id: id.get(),
                        path: index,
                        reason,
                    }
                })?;
                Ok(PairedPath {
                    fill_style: start.fill_style,
                    line_style: start.line_style,
                    commands,
                })
            })
            .collect()
    }

    /// Resolves the morph shape into a static shape at `ratio`
    pub fn shape_at_ratio(&self, ratio: u16) -> Result<Shape, EncodingError> {
        let paths = self
            .paired_paths()?
            .into_iter()
            .map(|pair| Path {
                fill_style: pair.fill_style,
                line_style: pair.line_style,
                commands: pair
                    .commands
                    .iter()
                    .map(|(start, end)| lerp_command(start, end, ratio))
                    .collect(),
            })
            .collect();

        Ok(Shape {
            bounds: lerp_rect(&self.start_bounds, &self.end_bounds, ratio),
            fill_styles: self.fill_styles.iter().map(|s| s.at(ratio)).collect(),
            line_styles: self.line_styles.iter().map(|s| s.at(ratio)).collect(),
            paths,
        })
    }
}

fn pair_commands(
    start: &[PathCommand],
    end: &[PathCommand],
) -> Result<Vec<(PathCommand, PathCommand)>, String> {
    if start.len() != end.len() {
        return Err(format!(
            "{} start edges vs {} end edges",
            start.len(),
            end.len()
        ));
    }

    let mut pen_start = Point::default();
    let mut pen_end = Point::default();
    let mut pairs = Vec::with_capacity(start.len());

    for (index, (s, e)) in start.iter().zip(end).enumerate() {
        let pair = match (*s, *e) {
            (PathCommand::MoveTo { .. }, PathCommand::MoveTo { .. })
            | (PathCommand::LineTo { .. }, PathCommand::LineTo { .. })
            | (PathCommand::CurveTo { .. }, PathCommand::CurveTo { .. }) => (*s, *e),
            (PathCommand::LineTo { x, y }, PathCommand::CurveTo { .. }) => {
                (promote_line(pen_start, Point::new(x, y)), *e)
            }
            (PathCommand::CurveTo { .. }, PathCommand::LineTo { x, y }) => {
                (*s, promote_line(pen_end, Point::new(x, y)))
            }
            _ => {
                return Err(format!(
                    "edge {index} is {} at start but {} at end",
                    s.kind(),
                    e.kind()
                ))
            }
        };
        pen_start = s.anchor();
        pen_end = e.anchor();
        pairs.push(pair);
    }

    Ok(pairs)
}

fn promote_line(from: Point, to: Point) -> PathCommand {
    let cx = ((i64::from(from.x) + i64::from(to.x)) / 2) as i32;
    let cy = ((i64::from(from.y) + i64::from(to.y)) / 2) as i32;
    PathCommand::CurveTo {
        cx,
        cy,
        x: to.x,
        y: to.y,
    }
}

fn lerp_command(start: &PathCommand, end: &PathCommand, ratio: u16) -> PathCommand {
    match (*start, *end) {
        (PathCommand::MoveTo { x, y }, PathCommand::MoveTo { x: ex, y: ey }) => {
            let p = Point::new(x, y).lerp(&Point::new(ex, ey), ratio);
            PathCommand::MoveTo { x: p.x, y: p.y }
        }
        (PathCommand::LineTo { x, y }, PathCommand::LineTo { x: ex, y: ey }) => {
            let p = Point::new(x, y).lerp(&Point::new(ex, ey), ratio);
            PathCommand::LineTo { x: p.x, y: p.y }
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
            let c = Point::new(cx, cy).lerp(&Point::new(ecx, ecy), ratio);
            let p = Point::new(x, y).lerp(&Point::new(ex, ey), ratio);
            PathCommand::CurveTo {
                cx: c.x,
                cy: c.y,
                x: p.x,
                y: p.y,
            }
        }
        // pairs are normalised by pair_commands
        _ => *start,
    }
}

fn lerp_rect(start: &Rect, end: &Rect, ratio: u16) -> Rect {
    let min = Point::new(start.x_min, start.y_min).lerp(&Point::new(end.x_min, end.y_min), ratio);
    let max = Point::new(start.x_max, start.y_max).lerp(&Point::new(end.x_max, end.y_max), ratio);
    Rect::new(min.x, max.x, min.y, max.y)
}

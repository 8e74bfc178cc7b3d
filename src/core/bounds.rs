//! Bounding-box reconciliation
//!
//! SVG output is framed by the record's native rectangle scaled by the zoom
//! factor. Canvas output instead shifts the geometry so that neither morph
//! endpoint lands at a negative coordinate.

use crate::domain::geometry::Rect;
use crate::domain::MorphShapeRecord;

/// Output-space rectangle (native rectangle times zoom)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRectangle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ExportRectangle {
    /// Scales all four bounds of `rect` uniformly by `zoom`
    pub fn scaled(rect: &Rect, zoom: f64) -> Self {
        Self {
            x_min: f64::from(rect.x_min) * zoom,
            x_max: f64::from(rect.x_max) * zoom,
            y_min: f64::from(rect.y_min) * zoom,
            y_max: f64::from(rect.y_max) * zoom,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Translation applied to Canvas geometry, in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateOffset {
    pub delta_x: i64,
    pub delta_y: i64,
}

impl CoordinateOffset {
    /// Offset moving the lowest start/end corner onto the origin
    ///
    /// `delta_x = -min(start.x_min, end.x_min)`, likewise for y. Computed in
    /// 64 bits so `i32::MIN` bounds don't overflow on negation.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphex::core::bounds::CoordinateOffset;
    /// use morphex::domain::Rect;
    ///
    /// let offset = CoordinateOffset::between(
    ///     &Rect::new(-40, 100, 10, 90),
    ///     &Rect::new(-10, 120, -60, 40),
    /// );
    /// assert_eq!(offset.delta_x, 40);
    /// assert_eq!(offset.delta_y, 60);
    /// ```
    pub fn between(start: &Rect, end: &Rect) -> Self {
        Self {
            delta_x: -i64::from(start.x_min.min(end.x_min)),
            delta_y: -i64::from(start.y_min.min(end.y_min)),
        }
    }

    /// Offset for a morph shape's own start/end bounds
    pub fn for_record(record: &MorphShapeRecord) -> Self {
        Self::between(&record.start_bounds, &record.end_bounds)
    }

    /// Applies the offset to a twip coordinate pair
    pub fn apply(&self, x: i32, y: i32) -> (i64, i64) {
        (i64::from(x) + self.delta_x, i64::from(y) + self.delta_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_export_rectangle_scaled() {
        let rect = Rect::new(-20, 200, 40, 400);
        let scaled = ExportRectangle::scaled(&rect, 2.0);
        assert_eq!(scaled.x_min, -40.0);
        assert_eq!(scaled.x_max, 400.0);
        assert_eq!(scaled.y_min, 80.0);
        assert_eq!(scaled.y_max, 800.0);
        assert_eq!(scaled.width(), 440.0);
        assert_eq!(scaled.height(), 720.0);
    }

    #[test_case(Rect::new(0, 10, 0, 10), Rect::new(0, 10, 0, 10) ; "both at origin")]
    #[test_case(Rect::new(-500, 10, 30, 40), Rect::new(-20, 10, -7, 40) ; "mixed signs")]
    #[test_case(Rect::new(100, 200, 300, 400), Rect::new(50, 60, 70, 80) ; "all positive")]
    #[test_case(Rect::new(i32::MIN, 0, i32::MIN, 0), Rect::new(0, 1, 0, 1) ; "extreme negative")]
    #[test_case(Rect::new(i32::MAX, i32::MAX, 5, 6), Rect::new(-1, 0, i32::MAX, i32::MAX) ; "extreme positive")]
    fn test_offset_keeps_both_endpoints_non_negative(start: Rect, end: Rect) {
        let offset = CoordinateOffset::between(&start, &end);

        assert!(i64::from(start.x_min) + offset.delta_x >= 0);
        assert!(i64::from(end.x_min) + offset.delta_x >= 0);
        assert!(i64::from(start.y_min) + offset.delta_y >= 0);
        assert!(i64::from(end.y_min) + offset.delta_y >= 0);

        // the lower of the two lands exactly on the origin
        let min_x = i64::from(start.x_min.min(end.x_min));
        let min_y = i64::from(start.y_min.min(end.y_min));
        assert_eq!(min_x + offset.delta_x, 0);
        assert_eq!(min_y + offset.delta_y, 0);
    }

    #[test]
    fn test_offset_apply() {
        let offset = CoordinateOffset {
            delta_x: 40,
            delta_y: -10,
        };
        assert_eq!(offset.apply(-40, 10), (0, 0));
    }
}

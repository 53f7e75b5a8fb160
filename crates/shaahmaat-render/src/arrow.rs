//! Arrow polygons in canvas pixels.
//!
//! Each arrow is built as a horizontal shape anchored at the start square's
//! centre and pointing right, then rotated about that centre towards the end
//! square. The rotation is emitted as an SVG `rotate(deg, cx, cy)` transform.

use std::f64::consts::PI;

use shaahmaat_core::{Arrow, Orientation, SquareName};

use crate::layout::grid_position;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Rotate by `radians` about `pivot`.
    pub fn rotate_about(self, pivot: Point, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Pixel centre of `square` on a `size`×`size` canvas.
pub fn square_center(orientation: Orientation, square: SquareName, size: u32) -> Point {
    let side = f64::from(size) / 8.0;
    let (row, col) = grid_position(orientation, square);
    Point::new(
        col as f64 * side + side / 2.0,
        row as f64 * side + side / 2.0,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGeometry {
    pub start: Point,
    pub end: Point,
    /// Tail top-left, tail top-right, head back top, tip, head back bottom,
    /// tail bottom-right, tail bottom-left; unrotated.
    pub points: [Point; 7],
    /// Clockwise in screen space (y grows downwards).
    pub angle_degrees: f64,
}

pub fn arrow_geometry(arrow: &Arrow, orientation: Orientation, size: u32) -> ArrowGeometry {
    let start = square_center(orientation, arrow.from, size);
    let end = square_center(orientation, arrow.to, size);

    let side = f64::from(size) / 8.0;
    let girth = side / 6.0;
    let head_height = girth * 3.0;
    let head_length = head_height * 1.5;

    let length = start.distance(end);
    let neck = start.x + length - head_length / 2.0;

    let points = [
        Point::new(start.x, start.y - girth / 2.0),
        Point::new(neck, start.y - girth / 2.0),
        Point::new(neck, start.y - head_height / 2.0),
        Point::new(start.x + length, start.y),
        Point::new(neck, start.y + head_height / 2.0),
        Point::new(neck, start.y + girth / 2.0),
        Point::new(start.x, start.y + girth / 2.0),
    ];

    let angle_degrees = if length == 0.0 {
        0.0
    } else {
        (end.y - start.y).atan2(end.x - start.x) * (180.0 / PI)
    };

    ArrowGeometry {
        start,
        end,
        points,
        angle_degrees,
    }
}

impl ArrowGeometry {
    /// Polygon vertices after applying the rotation.
    pub fn rotated_points(&self) -> [Point; 7] {
        let radians = self.angle_degrees.to_radians();
        self.points.map(|p| p.rotate_about(self.start, radians))
    }

    /// SVG `points` attribute: `x,y x,y ...`.
    pub fn points_attr(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn transform_attr(&self) -> String {
        format!(
            "rotate({}, {}, {})",
            self.angle_degrees, self.start.x, self.start.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(from: &str, to: &str) -> Arrow {
        Arrow {
            from: from.parse().unwrap(),
            to: to.parse().unwrap(),
        }
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_square_centers() {
        let a8 = "a8".parse().unwrap();
        assert_eq!(square_center(Orientation::White, a8, 256), Point::new(16.0, 16.0));
        assert_eq!(square_center(Orientation::Black, a8, 256), Point::new(240.0, 240.0));
    }

    #[test]
    fn test_vertical_arrow_white() {
        // 256px board: 32px squares, girth 16/3, head 16 high and 24 long.
        let geo = arrow_geometry(&arrow("e2", "e4"), Orientation::White, 256);
        assert_eq!(geo.start, Point::new(144.0, 208.0));
        assert_eq!(geo.end, Point::new(144.0, 144.0));
        assert_eq!(geo.angle_degrees, -90.0);

        let girth = 32.0 / 6.0;
        assert!(close(geo.points[0], Point::new(144.0, 208.0 - girth / 2.0)));
        assert!(close(geo.points[1], Point::new(144.0 + 64.0 - 12.0, 208.0 - girth / 2.0)));
        assert!(close(geo.points[2], Point::new(196.0, 200.0)));
        assert!(close(geo.points[3], Point::new(208.0, 208.0)));
        assert!(close(geo.points[4], Point::new(196.0, 216.0)));

        // After rotation the tip sits on the end square's centre.
        assert!(close(geo.rotated_points()[3], geo.end));
    }

    #[test]
    fn test_black_orientation_flips_direction() {
        let geo = arrow_geometry(&arrow("e2", "e4"), Orientation::Black, 256);
        assert_eq!(geo.start, Point::new(112.0, 48.0));
        assert_eq!(geo.end, Point::new(112.0, 112.0));
        assert_eq!(geo.angle_degrees, 90.0);
        assert!(close(geo.rotated_points()[3], geo.end));
    }

    #[test]
    fn test_diagonal_tip_lands_on_target() {
        let geo = arrow_geometry(&arrow("b1", "g6"), Orientation::White, 400);
        assert!((geo.angle_degrees + 45.0).abs() < 1e-9);
        assert!(close(geo.rotated_points()[3], geo.end));
    }

    #[test]
    fn test_zero_length_arrow() {
        let geo = arrow_geometry(&arrow("a1", "a1"), Orientation::White, 256);
        assert_eq!(geo.angle_degrees, 0.0);
        assert!(geo.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(geo.transform_attr(), "rotate(0, 16, 240)");
    }

    #[test]
    fn test_attribute_formatting() {
        let geo = arrow_geometry(&arrow("a1", "c1"), Orientation::White, 256);
        assert_eq!(geo.transform_attr(), "rotate(0, 16, 240)");
        let points = geo.points_attr();
        assert_eq!(points.split(' ').count(), 7);
        assert!(points.starts_with("16,237.33333333333334 "));
    }
}

use std::f64::consts::TAU;

use twinloop_common::{Color, Vector2D};

use crate::GeometryError;
use crate::line::Line;
use crate::surface::Surface;

/// A circle drawn as a regular `sides`-gon.
///
/// The polygon is materialized as owned [`Line`] segments. Every change to center,
/// radius or side count throws the old segments away and rebuilds all of them, so
/// `segments()` always matches the current geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector2D,
    radius: f64,
    sides: u32,
    color: Color,
    step: f64,
    segments: Vec<Line>,
}

impl Circle {
    pub const DEFAULT_SIDES: u32 = 25;

    pub fn new(
        center: Vector2D,
        radius: f64,
        sides: u32,
        color: Color,
    ) -> Result<Self, GeometryError> {
        validate_radius(radius)?;
        validate_sides(sides)?;
        let mut circle = Self {
            center,
            radius,
            sides,
            color,
            step: 0.0,
            segments: Vec::new(),
        };
        circle.rebuild();
        Ok(circle)
    }

    pub fn with_default_sides(
        center: Vector2D,
        radius: f64,
        color: Color,
    ) -> Result<Self, GeometryError> {
        Self::new(center, radius, Self::DEFAULT_SIDES, color)
    }

    pub fn center(&self) -> Vector2D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Angle between consecutive vertices, `2π / sides`.
    pub fn angular_step(&self) -> f64 {
        self.step
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    pub fn set_center(&mut self, center: Vector2D) -> &mut Self {
        self.center = center;
        self.rebuild();
        self
    }

    /// Rejected values leave the circle untouched.
    pub fn set_radius(&mut self, radius: f64) -> Result<&mut Self, GeometryError> {
        validate_radius(radius)?;
        self.radius = radius;
        self.rebuild();
        Ok(self)
    }

    /// Rejected values leave the circle untouched.
    pub fn set_sides(&mut self, sides: u32) -> Result<&mut Self, GeometryError> {
        validate_sides(sides)?;
        self.sides = sides;
        self.rebuild();
        Ok(self)
    }

    /// Recolors every segment. The color is also kept for later rebuilds.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        for segment in &mut self.segments {
            segment.set_color(color);
        }
    }

    pub fn draw(&self, transform: Vector2D, translate: Vector2D, surface: &mut dyn Surface) {
        for segment in &self.segments {
            segment.draw(transform, translate, surface);
        }
    }

    /// Vertex `i` sits at angle `i * step`; the last segment ends exactly on vertex 0.
    fn rebuild(&mut self) {
        self.step = TAU / f64::from(self.sides);

        let first = self.center + Vector2D::new(self.radius, 0.0);
        let mut segments = Vec::with_capacity(self.sides as usize);
        let mut start = first;
        for i in 1..=self.sides {
            let end = if i == self.sides {
                first
            } else {
                let angle = self.step * f64::from(i);
                self.center + Vector2D::new(self.radius * angle.cos(), self.radius * angle.sin())
            };
            segments.push(Line::new(start, end, self.color));
            start = end;
        }

        tracing::trace!(
            sides = self.sides,
            radius = self.radius,
            "circle segments rebuilt"
        );
        self.segments = segments;
    }
}

fn validate_sides(sides: u32) -> Result<(), GeometryError> {
    if sides == 0 {
        return Err(GeometryError::InvalidSides(sides));
    }
    Ok(())
}

fn validate_radius(radius: f64) -> Result<(), GeometryError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(GeometryError::InvalidRadius(radius));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    const EPS: f64 = 1e-9;

    fn approx(a: Vector2D, b: Vector2D) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    /// Expected vertex `i` of the polygon for a given geometry.
    fn vertex(center: Vector2D, radius: f64, sides: u32, i: u32) -> Vector2D {
        let angle = TAU / f64::from(sides) * f64::from(i);
        center + Vector2D::new(radius * angle.cos(), radius * angle.sin())
    }

    fn assert_matches_geometry(circle: &Circle) {
        let segments = circle.segments();
        assert_eq!(segments.len(), circle.sides() as usize);
        for (i, seg) in segments.iter().enumerate() {
            let i = i as u32;
            let from = vertex(circle.center(), circle.radius(), circle.sides(), i);
            let to = vertex(circle.center(), circle.radius(), circle.sides(), i + 1);
            assert!(approx(seg.start(), from), "segment {i} start {:?}", seg.start());
            assert!(approx(seg.end(), to), "segment {i} end {:?}", seg.end());
        }
    }

    #[test]
    fn square_from_four_sides() {
        let c = Circle::new(Vector2D::ZERO, 10.0, 4, Color::RED).unwrap();
        let expected = [
            Vector2D::new(10.0, 0.0),
            Vector2D::new(0.0, 10.0),
            Vector2D::new(-10.0, 0.0),
            Vector2D::new(0.0, -10.0),
            Vector2D::new(10.0, 0.0),
        ];
        assert_eq!(c.segments().len(), 4);
        for (i, seg) in c.segments().iter().enumerate() {
            assert!(approx(seg.start(), expected[i]));
            assert!(approx(seg.end(), expected[i + 1]));
            assert_eq!(seg.color(), Color::RED);
        }
    }

    #[test]
    fn polygon_is_closed_without_gaps() {
        for n in [1, 2, 3, 7, 25, 100] {
            let c = Circle::new(Vector2D::new(3.0, -4.0), 12.5, n, Color::WHITE).unwrap();
            let segs = c.segments();
            assert_eq!(segs.len(), n as usize);
            for i in 0..segs.len() {
                let next = &segs[(i + 1) % segs.len()];
                assert_eq!(segs[i].end(), next.start());
            }
        }
    }

    #[test]
    fn default_sides_is_25() {
        let c = Circle::with_default_sides(Vector2D::ZERO, 1.0, Color::BLACK).unwrap();
        assert_eq!(c.sides(), 25);
        assert_eq!(c.segments().len(), 25);
        assert!((c.angular_step() - TAU / 25.0).abs() < EPS);
    }

    #[test]
    fn zero_sides_rejected() {
        let err = Circle::new(Vector2D::ZERO, 1.0, 0, Color::BLACK).unwrap_err();
        assert_eq!(err, GeometryError::InvalidSides(0));
    }

    #[test]
    fn bad_radius_rejected() {
        assert!(Circle::new(Vector2D::ZERO, -1.0, 8, Color::BLACK).is_err());
        assert!(Circle::new(Vector2D::ZERO, f64::NAN, 8, Color::BLACK).is_err());
        assert!(Circle::new(Vector2D::ZERO, f64::INFINITY, 8, Color::BLACK).is_err());
    }

    #[test]
    fn set_radius_rebuilds() {
        let mut c = Circle::new(Vector2D::ZERO, 10.0, 6, Color::RED).unwrap();
        c.set_radius(20.0).unwrap();
        assert_matches_geometry(&c);
        assert!(approx(c.segments()[0].start(), Vector2D::new(20.0, 0.0)));
    }

    #[test]
    fn set_center_rebuilds() {
        let mut c = Circle::new(Vector2D::ZERO, 10.0, 6, Color::RED).unwrap();
        c.set_center(Vector2D::new(100.0, 50.0));
        assert_matches_geometry(&c);
        assert!(approx(c.segments()[0].start(), Vector2D::new(110.0, 50.0)));
    }

    #[test]
    fn set_sides_replaces_all_segments() {
        let mut c = Circle::with_default_sides(Vector2D::ZERO, 10.0, Color::RED).unwrap();
        assert_eq!(c.segments().len(), 25);
        c.set_sides(4).unwrap();
        assert_eq!(c.segments().len(), 4);
        assert!((c.angular_step() - TAU / 4.0).abs() < EPS);
        assert_matches_geometry(&c);
    }

    #[test]
    fn rejected_setter_keeps_geometry() {
        let mut c = Circle::new(Vector2D::ZERO, 10.0, 8, Color::RED).unwrap();
        let before = c.clone();
        assert!(c.set_sides(0).is_err());
        assert!(c.set_radius(-5.0).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn setters_chain() {
        let mut c = Circle::new(Vector2D::ZERO, 1.0, 3, Color::RED).unwrap();
        c.set_center(Vector2D::new(5.0, 5.0))
            .set_radius(2.0)
            .unwrap()
            .set_sides(5)
            .unwrap();
        assert_eq!(c.sides(), 5);
        assert_eq!(c.radius(), 2.0);
        assert_matches_geometry(&c);
    }

    #[test]
    fn set_color_reaches_every_segment_and_survives_rebuild() {
        let mut c = Circle::new(Vector2D::ZERO, 10.0, 12, Color::RED).unwrap();
        c.set_color(Color::BLUE);
        assert!(c.segments().iter().all(|s| s.color() == Color::BLUE));

        c.set_radius(3.0).unwrap();
        assert!(c.segments().iter().all(|s| s.color() == Color::BLUE));
    }

    #[test]
    fn draw_forwards_view_to_every_segment() {
        let c = Circle::new(Vector2D::ZERO, 10.0, 4, Color::GREEN).unwrap();
        let mut list = DrawList::new();
        c.draw(Vector2D::new(2.0, 2.0), Vector2D::new(400.0, 300.0), &mut list);

        let lines = list.lines();
        assert_eq!(lines.len(), 4);
        assert!(approx(lines[0].from, Vector2D::new(420.0, 300.0)));
        assert!(approx(lines[0].to, Vector2D::new(400.0, 320.0)));
        assert!(lines.iter().all(|l| l.color == Color::GREEN));
    }
}

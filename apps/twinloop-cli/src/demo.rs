use std::collections::VecDeque;

use glam::DVec2;
use twinloop_common::{Color, EntityId, Vector2D};
use twinloop_input::EventKind;
use twinloop_kernel::{Scene, World};
use twinloop_render::{Circle, GeometryError, Line, Rect, Sprite, Surface, TextureId};

/// Texture slot the orbiting ship is drawn from. The asset layer owns the image.
pub const SHIP_TEXTURE: TextureId = TextureId(0);

const BORDER_MARGIN: f64 = 10.0;
const PULSE_RADIUS: f64 = 60.0;
const PULSE_AMPLITUDE: f64 = 20.0;
const ORBIT_RADIUS: f64 = 150.0;
const ORBIT_SPEED: f64 = 0.3;
const MARKER_RADIUS: f64 = 8.0;
const MAX_MARKERS: usize = 32;

/// Small world used by the runner: a window border, a pulsing circle, a ship orbiting
/// it, and a red marker dropped wherever the user clicks.
///
/// Model space has its origin at the window center with y pointing up.
pub struct DemoWorld {
    scene: Scene,
    tick: u64,
    pulse: EntityId,
    ship: EntityId,
    markers: VecDeque<EntityId>,
}

impl DemoWorld {
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        let half = Vector2D::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
        let mut scene = Scene::with_view(Vector2D::new(1.0, -1.0), half);

        let (hx, hy) = (half.x - BORDER_MARGIN, half.y - BORDER_MARGIN);
        let corners = [
            Vector2D::new(-hx, -hy),
            Vector2D::new(hx, -hy),
            Vector2D::new(hx, hy),
            Vector2D::new(-hx, hy),
        ];
        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            scene.spawn(Line::new(corners[i], next, Color::WHITE));
        }

        let pulse = scene.spawn(Circle::with_default_sides(
            Vector2D::ZERO,
            PULSE_RADIUS,
            Color::GREEN,
        )?);
        let ship = scene.spawn(Sprite::new(
            SHIP_TEXTURE,
            Rect::new(0, 0, 32, 32),
            Vector2D::new(ORBIT_RADIUS, 0.0),
            0.0,
        ));

        tracing::info!(width, height, shapes = scene.len(), "demo world created");
        Ok(Self {
            scene,
            tick: 0,
            pulse,
            ship,
            markers: VecDeque::new(),
        })
    }

    fn advance_pulse(&mut self) -> Result<(), GeometryError> {
        let t = self.tick as f64;
        let radius = PULSE_RADIUS + PULSE_AMPLITUDE * (t * 0.5).sin();
        let sides = 6 + (self.tick % 20) as u32;
        if let Some(circle) = self.scene.get_mut(self.pulse).and_then(|s| s.as_circle_mut()) {
            circle.set_radius(radius)?.set_sides(sides)?;
        }
        Ok(())
    }

    fn advance_ship(&mut self) {
        let theta = self.tick as f64 * ORBIT_SPEED;
        let position = DVec2::from_angle(theta) * ORBIT_RADIUS;
        if let Some(sprite) = self.scene.get_mut(self.ship).and_then(|s| s.as_sprite_mut()) {
            sprite.set_position(position.into());
            sprite.set_angle(theta);
        }
    }

    fn drop_marker(&mut self, device: Vector2D) -> Result<(), GeometryError> {
        let Some(model) = self.scene.to_model(device) else {
            return Ok(());
        };
        let marker = Circle::new(model, MARKER_RADIUS, 12, Color::RED)?;
        self.markers.push_back(self.scene.spawn(marker));
        if self.markers.len() > MAX_MARKERS {
            if let Some(oldest) = self.markers.pop_front() {
                self.scene.despawn(oldest);
            }
        }
        tracing::debug!(
            x = model.x,
            y = model.y,
            markers = self.markers.len(),
            "marker dropped"
        );
        Ok(())
    }
}

#[cfg(test)]
impl DemoWorld {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn pulse(&self) -> EntityId {
        self.pulse
    }

    pub fn ship(&self) -> EntityId {
        self.ship
    }

    pub fn markers(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.markers.iter().copied()
    }
}

impl World for DemoWorld {
    fn render(&self, surface: &mut dyn Surface) {
        self.scene.render(surface);
    }

    fn update(&mut self, delta_ticks: u32) {
        self.tick += u64::from(delta_ticks);
        if let Err(e) = self.advance_pulse() {
            tracing::warn!("pulse update rejected: {e}");
        }
        self.advance_ship();
    }

    fn event(&mut self, kind: EventKind, position: Vector2D) {
        match kind {
            EventKind::MouseClick => {
                if let Err(e) = self.drop_marker(position) {
                    tracing::warn!("marker rejected: {e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinloop_render::{DrawCommand, DrawList, Shape};

    fn world() -> DemoWorld {
        DemoWorld::new(800, 600).unwrap()
    }

    fn pulse_circle(w: &DemoWorld) -> &Circle {
        match w.scene().get(w.pulse()) {
            Some(Shape::Circle(c)) => c,
            other => panic!("pulse is not a circle: {other:?}"),
        }
    }

    #[test]
    fn starts_with_border_pulse_and_ship() {
        let w = world();
        assert_eq!(w.scene().len(), 4 + 2);
        assert_eq!(pulse_circle(&w).sides(), Circle::DEFAULT_SIDES);
        assert_eq!(w.markers().count(), 0);
    }

    #[test]
    fn border_hugs_the_window() {
        let w = world();
        let mut list = DrawList::new();
        w.render(&mut list);
        let starts: Vec<Vector2D> = list
            .lines()
            .into_iter()
            .filter(|l| l.color == Color::WHITE)
            .map(|l| l.from)
            .collect();
        assert_eq!(starts.len(), 4);
        for corner in [
            Vector2D::new(10.0, 590.0),
            Vector2D::new(790.0, 590.0),
            Vector2D::new(790.0, 10.0),
            Vector2D::new(10.0, 10.0),
        ] {
            assert!(starts.contains(&corner), "missing corner {corner:?}");
        }
    }

    #[test]
    fn update_rebuilds_pulse() {
        let mut w = world();
        w.update(3);
        assert_eq!(w.tick(), 3);
        let c = pulse_circle(&w);
        assert_eq!(c.sides(), 9);
        assert_eq!(c.segments().len(), 9);
        let expected = PULSE_RADIUS + PULSE_AMPLITUDE * 1.5f64.sin();
        assert!((c.radius() - expected).abs() < 1e-12);
    }

    #[test]
    fn update_moves_ship() {
        let mut w = world();
        w.update(1);
        let Some(Shape::Sprite(ship)) = w.scene().get(w.ship()) else {
            panic!("ship missing");
        };
        assert!((ship.angle() - ORBIT_SPEED).abs() < 1e-12);
        let expected = DVec2::from_angle(ORBIT_SPEED) * ORBIT_RADIUS;
        assert!((ship.position().x - expected.x).abs() < 1e-9);
        assert!((ship.position().y - expected.y).abs() < 1e-9);

        let mut list = DrawList::new();
        w.render(&mut list);
        let copies = list
            .commands()
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::Texture { dst, .. } if dst.w == 32 && dst.h == 32)
            })
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn click_drops_marker_under_the_pointer() {
        let mut w = world();
        w.event(EventKind::MouseClick, Vector2D::new(120.0, 80.0));
        let ids: Vec<_> = w.markers().collect();
        assert_eq!(ids.len(), 1);
        let Some(Shape::Circle(marker)) = w.scene().get(ids[0]) else {
            panic!("marker missing");
        };
        assert_eq!(marker.center(), Vector2D::new(-280.0, 220.0));
        assert_eq!(marker.color(), Color::RED);

        let device = marker
            .center()
            .to_device(w.scene().transform(), w.scene().translate());
        assert_eq!(device, Vector2D::new(120.0, 80.0));
    }

    #[test]
    fn markers_are_capped() {
        let mut w = world();
        for i in 0..(MAX_MARKERS + 5) {
            w.event(EventKind::MouseClick, Vector2D::new(i as f64, 0.0));
        }
        assert_eq!(w.markers().count(), MAX_MARKERS);
        assert_eq!(w.scene().len(), 6 + MAX_MARKERS);
    }
}

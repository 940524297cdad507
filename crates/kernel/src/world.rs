use std::collections::{BTreeMap, HashMap};

use glam::DVec2;
use twinloop_common::{EntityId, Vector2D};
use twinloop_input::EventKind;
use twinloop_render::{Shape, Surface};

/// Everything the driver needs from a simulation.
///
/// Rendering only reads; `update` and `event` are the sole mutation paths. The driver
/// never calls two of these at the same time on one world.
pub trait World {
    /// Draw every live drawable onto `surface`.
    fn render(&self, surface: &mut dyn Surface);

    /// Advance the simulation by `delta_ticks` fixed steps.
    fn update(&mut self, delta_ticks: u32);

    /// React to a discrete input event at a surface-space position.
    fn event(&mut self, kind: EventKind, position: Vector2D);
}

/// Owner of the top-level shapes of a world, plus the view used to draw them.
///
/// Shapes are drawn in spawn order, so later shapes paint over earlier ones.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: BTreeMap<u64, (EntityId, Shape)>,
    slots: HashMap<EntityId, u64>,
    next_slot: u64,
    transform: Vector2D,
    translate: Vector2D,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with the identity view.
    pub fn new() -> Self {
        Self::with_view(Vector2D::ONE, Vector2D::ZERO)
    }

    pub fn with_view(transform: Vector2D, translate: Vector2D) -> Self {
        Self {
            shapes: BTreeMap::new(),
            slots: HashMap::new(),
            next_slot: 0,
            transform,
            translate,
        }
    }

    pub fn transform(&self) -> Vector2D {
        self.transform
    }

    pub fn translate(&self) -> Vector2D {
        self.translate
    }

    pub fn set_view(&mut self, transform: Vector2D, translate: Vector2D) {
        self.transform = transform;
        self.translate = translate;
    }

    /// Map a surface-space point back into model space.
    ///
    /// Returns `None` when the view collapses an axis (zero scale).
    pub fn to_model(&self, device: Vector2D) -> Option<Vector2D> {
        let scale = DVec2::from(self.transform);
        if scale.x == 0.0 || scale.y == 0.0 {
            return None;
        }
        Some(((DVec2::from(device) - DVec2::from(self.translate)) / scale).into())
    }

    pub fn spawn(&mut self, shape: impl Into<Shape>) -> EntityId {
        let id = EntityId::new();
        let slot = self.next_slot;
        self.next_slot += 1;
        self.shapes.insert(slot, (id, shape.into()));
        self.slots.insert(id, slot);
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Shape> {
        let slot = self.slots.remove(&id)?;
        self.shapes.remove(&slot).map(|(_, shape)| shape)
    }

    pub fn get(&self, id: EntityId) -> Option<&Shape> {
        let slot = self.slots.get(&id)?;
        self.shapes.get(slot).map(|(_, shape)| shape)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Shape> {
        let slot = self.slots.get(&id)?;
        self.shapes.get_mut(slot).map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Shape)> {
        self.shapes.values().map(|(id, shape)| (*id, shape))
    }

    /// Draw every shape through the scene's view.
    pub fn render(&self, surface: &mut dyn Surface) {
        for (_, shape) in self.shapes.values() {
            shape.draw(self.transform, self.translate, surface);
        }
    }
}

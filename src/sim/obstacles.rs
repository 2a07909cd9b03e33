//! Obstacle field: grid spawn, random drift, lossless wall bounce

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bounds::WorldBounds;

/// Row-major spawn grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnLayout {
    /// Position of the first obstacle
    pub origin: Vec2,
    /// Spacing between neighbouring columns (x) and rows (y)
    pub step: Vec2,
    /// Obstacles per row
    pub columns: u32,
}

impl SpawnLayout {
    /// Spawn position of the `index`-th obstacle
    pub fn position(&self, index: u32) -> Vec2 {
        let columns = self.columns.max(1);
        let col = index % columns;
        let row = index / columns;
        self.origin + Vec2::new(col as f32 * self.step.x, row as f32 * self.step.y)
    }
}

/// Inclusive per-axis range for initial obstacle velocities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRange {
    pub min: f32,
    pub max: f32,
}

impl VelocityRange {
    fn sample(&self, rng: &mut Pcg32) -> f32 {
        rng.random_range(self.min..=self.max)
    }
}

/// The fixed set of obstacle bodies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    bodies: Vec<Body>,
}

impl ObstacleField {
    /// Spawn `count` obstacles on `layout`, ids starting at `first_id`.
    ///
    /// Layout consistency with the world bounds is checked by settings
    /// validation before this is called.
    pub fn initialize(
        count: u32,
        layout: &SpawnLayout,
        radius: f32,
        velocity: VelocityRange,
        first_id: u32,
        rng: &mut Pcg32,
    ) -> Self {
        let bodies = (0..count)
            .map(|i| {
                let vel = Vec2::new(velocity.sample(rng), velocity.sample(rng));
                Body::new(first_id + i, layout.position(i), radius).with_velocity(vel)
            })
            .collect();
        Self { bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access for the physics backend's collision pass
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Move every obstacle one tick and bounce it off the world edge
    pub fn advance(&mut self, bounds: &WorldBounds) {
        for body in &mut self.bodies {
            body.advance();
            bounds.bounce(body, 1.0);
        }
    }

    /// Bounce any obstacle that sits across the world edge back inside.
    /// Returns how many were moved.
    pub fn contain(&mut self, bounds: &WorldBounds) -> usize {
        self.bodies
            .iter_mut()
            .map(|body| bounds.bounce(body, 1.0))
            .filter(|&hit| hit)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn layout() -> SpawnLayout {
        SpawnLayout {
            origin: Vec2::new(2500.0, 2500.0),
            step: Vec2::new(50.0, 50.0),
            columns: 10,
        }
    }

    const RANGE: VelocityRange = VelocityRange {
        min: -50.0,
        max: 50.0,
    };

    #[test]
    fn test_population_count() {
        let mut rng = Pcg32::seed_from_u64(42);
        let field = ObstacleField::initialize(100, &layout(), 20.0, RANGE, 1, &mut rng);
        assert_eq!(field.len(), 100);

        let ids: HashSet<u32> = field.bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 100);
        let cells: HashSet<(i32, i32)> = field
            .bodies()
            .iter()
            .map(|b| (b.pos.x as i32, b.pos.y as i32))
            .collect();
        assert_eq!(cells.len(), 100);

        let in_range = |v: f32| (RANGE.min..=RANGE.max).contains(&v);
        for body in field.bodies() {
            assert!(body.vel.is_finite());
            assert!(in_range(body.vel.x));
            assert!(in_range(body.vel.y));
            assert_eq!(body.radius(), 20.0);
        }
    }

    #[test]
    fn test_grid_positions() {
        let l = layout();
        assert_eq!(l.position(0), Vec2::new(2500.0, 2500.0));
        assert_eq!(l.position(9), Vec2::new(2950.0, 2500.0));
        assert_eq!(l.position(10), Vec2::new(2500.0, 2550.0));
        assert_eq!(l.position(99), Vec2::new(2950.0, 2950.0));
    }

    fn seeded_field(count: u32, seed: u64) -> ObstacleField {
        let mut rng = Pcg32::seed_from_u64(seed);
        ObstacleField::initialize(count, &layout(), 20.0, RANGE, 1, &mut rng)
    }

    #[test]
    fn test_same_seed_same_field() {
        assert_eq!(seeded_field(20, 7).bodies(), seeded_field(20, 7).bodies());
    }

    #[test]
    fn test_empty_field() {
        assert!(seeded_field(0, 1).is_empty());
    }

    #[test]
    fn test_advance_bounces_off_edge() {
        let bounds = WorldBounds::new(200.0, 200.0);
        let body = Body::new(1, Vec2::new(170.0, 100.0), 20.0).with_velocity(Vec2::new(25.0, 0.0));
        let mut field = ObstacleField { bodies: vec![body] };
        field.advance(&bounds);
        let body = &field.bodies()[0];
        assert_eq!(body.vel.x, -25.0);
        assert_eq!(body.pos.x, 180.0);

        field.advance(&bounds);
        assert_eq!(field.bodies()[0].pos.x, 155.0);
    }
    #[test]
    fn test_contain_returns_pushed_bodies() {
        let bounds = WorldBounds::new(200.0, 200.0);
        let mut field = ObstacleField {
            bodies: vec![
                Body::new(1, Vec2::new(12.0, 100.0), 20.0).with_velocity(Vec2::new(-3.0, 0.0)),
                Body::new(2, Vec2::new(100.0, 100.0), 20.0),
            ],
        };
        assert_eq!(field.contain(&bounds), 1);
        assert_eq!(field.bodies()[0].pos.x, 20.0);
        assert_eq!(field.bodies()[0].vel.x, 3.0);
        assert_eq!(field.contain(&bounds), 0);
    }
}

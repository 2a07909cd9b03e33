//! Physics backend interface and the bundled arcade backend
//!
//! The simulation never resolves contacts itself. It hands bodies to a
//! `PhysicsBackend` for world containment, circle-circle response and
//! velocity clamping.

use glam::Vec2;

use super::body::Body;
use super::bounds::WorldBounds;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Unit normal pointing from the first circle towards the second
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
pub fn circle_circle_collision(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
) -> CollisionResult {
    let delta = b_pos - a_pos;
    let reach = a_radius + b_radius;
    let dist_sq = delta.length_squared();

    if dist_sq >= reach * reach {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Coincident centres: separate along +X
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::X };

    CollisionResult {
        hit: true,
        point: a_pos + normal * a_radius,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - (1 + e)(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// Collision capability the simulation calls into
pub trait PhysicsBackend {
    /// Keep the controlled body inside `bounds` with collision response
    fn contain(&mut self, body: &mut Body, bounds: &WorldBounds);

    /// Resolve contacts between all bodies after they have moved this tick
    fn resolve_collisions(&mut self, player: &mut Body, obstacles: &mut [Body]);

    /// Limit a body's speed, if the backend enforces a limit
    fn clamp_velocity(&mut self, body: &mut Body);
}

/// Equal-mass circle physics with wall reflection
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    /// Wall restitution for the controlled body
    pub wall_restitution: f32,
    /// Body-body restitution (1.0 = lossless)
    pub body_restitution: f32,
    /// Speed limit applied by `clamp_velocity`
    pub max_speed: Option<f32>,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self {
            wall_restitution: 1.0,
            body_restitution: 1.0,
            max_speed: None,
        }
    }
}

impl ArcadePhysics {
    /// Separate two overlapping bodies and exchange momentum along the normal
    fn resolve_pair(&self, a: &mut Body, b: &mut Body) -> bool {
        let result = circle_circle_collision(a.pos, a.radius(), b.pos, b.radius());
        if !result.hit {
            return false;
        }

        log::trace!(
            "Contact {} -> {} at ({:.1}, {:.1}), depth {:.2}",
            a.id,
            b.id,
            result.point.x,
            result.point.y,
            result.penetration
        );
        let correction = result.normal * (result.penetration * 0.5);
        a.pos -= correction;
        b.pos += correction;

        let approach = (b.vel - a.vel).dot(result.normal);
        if approach < 0.0 {
            let impulse = -(1.0 + self.body_restitution) * approach * 0.5;
            a.vel -= result.normal * impulse;
            b.vel += result.normal * impulse;
        }
        true
    }
}

impl PhysicsBackend for ArcadePhysics {
    fn contain(&mut self, body: &mut Body, bounds: &WorldBounds) {
        let r = body.radius();
        let walls = [
            (body.pos.x - r < 0.0, Vec2::X),
            (body.pos.x + r > bounds.width, Vec2::NEG_X),
            (body.pos.y - r < 0.0, Vec2::Y),
            (body.pos.y + r > bounds.height, Vec2::NEG_Y),
        ];
        for (penetrating, normal) in walls {
            if penetrating && body.vel.dot(normal) < 0.0 {
                body.vel = reflect_velocity(body.vel, normal, self.wall_restitution);
            }
        }
        body.pos = body.pos.clamp(Vec2::splat(r), bounds.size() - Vec2::splat(r));
    }

    fn resolve_collisions(&mut self, player: &mut Body, obstacles: &mut [Body]) {
        let mut contacts = 0usize;

        for obstacle in obstacles.iter_mut() {
            if self.resolve_pair(player, obstacle) {
                contacts += 1;
            }
        }

        // Stable pair order (by index) keeps resolution deterministic
        for i in 0..obstacles.len() {
            let (head, tail) = obstacles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if self.resolve_pair(a, b) {
                    contacts += 1;
                }
            }
        }

        if contacts > 0 {
            log::trace!("Resolved {} contacts", contacts);
        }
    }

    fn clamp_velocity(&mut self, body: &mut Body) {
        if let Some(max) = self.max_speed {
            body.vel = body.vel.clamp_length_max(max);
        }
    }
}

use glam::Vec2;
use rapier2d::prelude::*;

use crate::components::avatar::Avatar;
use crate::core::collision::CollisionGrid;
use crate::core::geometry::Rect;
use crate::interaction::motion::MotionSubstrate;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Velocity components smaller than this after a step are treated as zero.
const VELOCITY_EPSILON: f32 = 1e-3;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Handle pair for a body and its single collider.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Rapier2D world for a top-down map: static wall boxes and one avatar body.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world. Top-down maps use `Vec2::ZERO`.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Add a parentless static box covering `rect`.
    pub fn add_static_box(&mut self, rect: &Rect) -> ColliderHandle {
        let center = rect.center();
        let collider = ColliderBuilder::cuboid(rect.size.x / 2.0, rect.size.y / 2.0)
            .translation(vec2_to_na(center))
            .friction(0.0)
            .build();
        self.colliders.insert(collider)
    }

    /// Add static boxes for every solid run of `grid`, plus walls just
    /// outside its bounds. Returns the number of colliders added.
    pub fn add_static_grid(&mut self, grid: &CollisionGrid) -> usize {
        let runs = grid.solid_runs();
        for run in &runs {
            self.add_static_box(run);
        }
        let bounds = grid.bounds();
        let t = grid.tile_size().max(1.0);
        let max = bounds.max();
        let walls = [
            Rect::new(bounds.min.x - t, bounds.min.y - t, bounds.size.x + 2.0 * t, t),
            Rect::new(bounds.min.x - t, max.y, bounds.size.x + 2.0 * t, t),
            Rect::new(bounds.min.x - t, bounds.min.y, t, bounds.size.y),
            Rect::new(max.x, bounds.min.y, t, bounds.size.y),
        ];
        for wall in &walls {
            self.add_static_box(wall);
        }
        runs.len() + walls.len()
    }

    /// Create the avatar's body: dynamic, rotation locked, frictionless,
    /// with a cuboid matching the avatar's collision box.
    pub fn create_avatar_body(&mut self, avatar: &Avatar) -> PhysicsBody {
        let rb = RigidBodyBuilder::dynamic()
            .translation(vec2_to_na(avatar.body_center()))
            .lock_rotations()
            .gravity_scale(0.0)
            .build();
        let body_handle = self.bodies.insert(rb);

        let half = avatar.body.size / 2.0;
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .friction(0.0)
            .restitution(0.0)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a body.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Current center of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders, static ones included.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Step the simulation once.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }
}

// ---------------------------------------------------------------------------
// Motion substrate
// ---------------------------------------------------------------------------

/// Rapier-backed avatar movement against a tile map's solid tiles.
pub struct PhysicsSubstrate {
    world: PhysicsWorld,
    avatar: PhysicsBody,
}

impl PhysicsSubstrate {
    pub fn new(grid: &CollisionGrid, avatar: &Avatar, gravity: Vec2) -> Self {
        let mut world = PhysicsWorld::new(gravity);
        let statics = world.add_static_grid(grid);
        let body = world.create_avatar_body(avatar);
        log::debug!("physics world: {} static colliders", statics);
        Self { world, avatar: body }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
}

impl MotionSubstrate for PhysicsSubstrate {
    fn advance(&mut self, avatar: &mut Avatar, dt: f32) {
        // Game code may have moved the avatar (spawn, respawn).
        let center = avatar.body_center();
        if self.world.body_position(&self.avatar).distance_squared(center) > f32::EPSILON {
            self.world.set_position(&self.avatar, center);
        }

        self.world.set_dt(dt);
        self.world.set_velocity(&self.avatar, avatar.velocity);
        self.world.step();

        avatar.set_body_center(self.world.body_position(&self.avatar));
        let mut vel = self.world.velocity(&self.avatar);
        if vel.x.abs() < VELOCITY_EPSILON {
            vel.x = 0.0;
        }
        if vel.y.abs() < VELOCITY_EPSILON {
            vel.y = 0.0;
        }
        avatar.velocity = vel;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn static_grid_builds_runs_and_walls() {
        let mut grid = CollisionGrid::open(4, 4, 32.0);
        grid.set_solid(1, 1, true);
        grid.set_solid(2, 1, true);
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        assert_eq!(world.add_static_grid(&grid), 5);
        assert_eq!(world.collider_count(), 5);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn free_avatar_moves_at_its_velocity() {
        let grid = CollisionGrid::open(20, 20, 32.0);
        let mut avatar = Avatar::new(Vec2::new(200.0, 200.0));
        let mut substrate = PhysicsSubstrate::new(&grid, &avatar, Vec2::ZERO);
        avatar.velocity = Vec2::new(175.0, 0.0);
        for _ in 0..60 {
            substrate.advance(&mut avatar, DT);
        }
        assert!((avatar.pos.x - 375.0).abs() < 1.0, "x = {}", avatar.pos.x);
        assert!((avatar.pos.y - 200.0).abs() < 0.01);
    }

    #[test]
    fn avatar_stops_at_solid_tiles() {
        let mut grid = CollisionGrid::open(20, 20, 32.0);
        for y in 0..20 {
            grid.set_solid(10, y, true);
        }
        let mut avatar = Avatar::new(Vec2::new(200.0, 200.0));
        let mut substrate = PhysicsSubstrate::new(&grid, &avatar, Vec2::ZERO);
        for _ in 0..120 {
            avatar.velocity = Vec2::new(175.0, 0.0);
            substrate.advance(&mut avatar, DT);
        }
        // wall starts at x = 320
        let right = avatar.bounding_box().max().x;
        assert!(right <= 322.0, "avatar went through the wall: {}", right);
        assert!(right > 310.0);
    }

    #[test]
    fn teleport_is_picked_up() {
        let grid = CollisionGrid::open(20, 20, 32.0);
        let mut avatar = Avatar::new(Vec2::new(100.0, 100.0));
        let mut substrate = PhysicsSubstrate::new(&grid, &avatar, Vec2::ZERO);
        avatar.pos = Vec2::new(400.0, 300.0);
        avatar.velocity = Vec2::ZERO;
        substrate.advance(&mut avatar, DT);
        assert!(avatar.pos.distance(Vec2::new(400.0, 300.0)) < 0.01);
        assert_eq!(avatar.velocity, Vec2::ZERO);
    }
}

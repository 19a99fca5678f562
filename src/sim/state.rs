//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; the host owns one
//! instance and feeds it to `tick` once per animation frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// Events raised during a tick, drained by the host for banner/HUD effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Rim overlap while descending; carries the new streak value.
    Scored { streak: u32 },
    /// Ball fell out with a streak in progress; carries the broken streak.
    Missed { broken_streak: u32 },
}

/// Logical canvas size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where a fresh ball appears, computed from whatever the bounds are
    /// at reset time (not cached at session start).
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - SPAWN_BOTTOM_OFFSET)
    }
}

/// The player's projectile
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    /// px per frame
    pub vel: Vec2,
    pub radius: f32,
    /// Lateral-drift charge, set during the drag and consumed in flight
    pub spin: f32,
    /// Visual roll angle (radians, wraps freely)
    pub rotation: f32,
    /// False while waiting for a launch; velocity is meaningless then
    pub moving: bool,
}

impl Ball {
    /// A fresh ball resting at the spawn point
    pub fn at_spawn(bounds: &Bounds) -> Self {
        Self {
            pos: bounds.spawn_point(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            spin: 0.0,
            rotation: 0.0,
            moving: false,
        }
    }

    /// Slingshot release: take the launch velocity and charged spin, then
    /// enter free flight.
    pub fn launch(&mut self, vel: Vec2, spin: f32) {
        self.vel = vel;
        self.spin = spin.clamp(-SPIN_LIMIT, SPIN_LIMIT);
        self.moving = true;
    }
}

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The scoring target
///
/// Positioned once at construction; a mid-game canvas resize does not
/// re-center it.
#[derive(Debug, Clone, Serialize)]
pub struct Hoop {
    /// Rim left edge
    pub pos: Vec2,
    pub width: f32,
    /// Drawn behind the rim, never collided
    pub backboard: Rect,
    /// Patrol speed in px/frame (0 = stationary)
    pub speed: f32,
    /// Patrol direction, ±1
    pub direction: f32,
    /// Net ripple animation running
    pub swishing: bool,
    /// Ripple progress in [0, 1]
    pub swish_progress: f32,
}

impl Hoop {
    pub fn new(bounds: &Bounds) -> Self {
        let pos = Vec2::new(
            bounds.width / 2.0 - HOOP_WIDTH / 2.0,
            bounds.height * HOOP_Y_FRACTION,
        );
        Self {
            pos,
            width: HOOP_WIDTH,
            backboard: Rect {
                x: pos.x + BACKBOARD_OFFSET_X,
                y: pos.y + BACKBOARD_OFFSET_Y,
                width: BACKBOARD_WIDTH,
                height: BACKBOARD_HEIGHT,
            },
            speed: 0.0,
            direction: 1.0,
            swishing: false,
            swish_progress: 0.0,
        }
    }

    /// One frame of patrol motion and net animation.
    pub fn step(&mut self, bounds: &Bounds) {
        if self.speed != 0.0 {
            let delta = self.speed * self.direction;
            self.pos.x += delta;
            self.backboard.x += delta;
            if self.pos.x + self.width > bounds.width - HOOP_EDGE_MARGIN
                || self.pos.x < HOOP_EDGE_MARGIN
            {
                self.direction *= -1.0;
            }
        }
        if self.swishing {
            self.swish_progress += SWISH_STEP;
            if self.swish_progress >= 1.0 {
                self.swishing = false;
                self.swish_progress = 0.0;
            }
        }
    }

    /// Start (or restart) the net ripple.
    pub fn trigger_swish(&mut self) {
        self.swishing = true;
        self.swish_progress = 0.0;
    }

    /// Horizontal strand displacement for the current ripple progress.
    ///
    /// Half-sine: zero at rest and at completion, peaking mid-animation so
    /// the net snaps out and settles back. Strands alternate sign by index.
    pub fn swish_amount(&self) -> f32 {
        NET_HEIGHT * 0.5 * (self.swish_progress * std::f32::consts::PI).sin()
    }
}

/// Score debris
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Index into the renderer's pastel palette
    pub color: u8,
    /// Frames remaining; dropped at zero
    pub life: i32,
}

impl Particle {
    /// Fade factor as the particle ages
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / PARTICLE_LIFE as f32).clamp(0.0, 1.0)
    }
}

/// Number of palette entries particles draw their color from
pub const PARTICLE_PALETTE_SIZE: u8 = 4;

/// Compact state summary for debug logging.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub streak: u32,
    pub high_score: u32,
    pub wind: f32,
    pub hoop_speed: f32,
    pub ball_moving: bool,
}

/// Complete game state (deterministic under a fixed seed)
#[derive(Debug, Clone)]
pub struct GameState {
    pub bounds: Bounds,
    pub ball: Ball,
    pub hoop: Hoop,
    pub scoreboard: super::score::Scoreboard,
    /// Global lateral acceleration on the ball, a function of the streak
    pub wind: f32,
    /// Live debris; membership mutated every frame
    pub particles: Vec<Particle>,
    /// Pending events for the host; drained via `take_events`
    pub events: Vec<GameEvent>,
    /// Frames simulated since construction
    pub frame: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session sized to the canvas at this moment.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let bounds = Bounds::new(width, height);
        Self {
            ball: Ball::at_spawn(&bounds),
            hoop: Hoop::new(&bounds),
            bounds,
            scoreboard: super::score::Scoreboard::new(),
            wind: 0.0,
            particles: Vec::new(),
            events: Vec::new(),
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Adopt a new canvas size. Only future physics and draws use it; the
    /// hoop keeps its position and the live ball is not repositioned.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        log::debug!("bounds now {}x{}", width, height);
    }

    /// Replace the ball wholesale at the spawn point.
    pub fn reset_ball(&mut self) {
        self.ball = Ball::at_spawn(&self.bounds);
    }

    /// Re-derive wind and hoop speed from the current streak. Wind is
    /// re-rolled on every call, not fixed per tier.
    pub fn recompute_difficulty(&mut self) {
        let d = super::score::difficulty_for_streak(self.scoreboard.streak, &mut self.rng);
        self.wind = d.wind;
        self.hoop.speed = d.hoop_speed;
    }

    /// Burst of debris at a made shot.
    pub fn spawn_burst(&mut self, at: Vec2) {
        for _ in 0..PARTICLE_BURST {
            let vx = (self.rng.random::<f32>() - 0.5) * 6.0;
            let vy = (self.rng.random::<f32>() - 5.0) * 4.0;
            let radius = self.rng.random::<f32>() * 4.0 + 2.0;
            let color = self.rng.random_range(0..PARTICLE_PALETTE_SIZE);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(vx, vy),
                radius,
                color,
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Drain pending events for the host.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            streak: self.scoreboard.streak,
            high_score: self.scoreboard.high_score,
            wind: self.wind,
            hoop_speed: self.hoop.speed,
            ball_moving: self.ball.moving,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_point_tracks_bounds() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(bounds.spawn_point(), Vec2::new(400.0, 380.0));

        let mut state = GameState::new(800.0, 600.0, 1);
        state.set_bounds(1000.0, 900.0);
        state.reset_ball();
        assert_eq!(state.ball.pos, Vec2::new(500.0, 680.0));
    }

    #[test]
    fn test_hoop_fixed_after_resize() {
        let mut state = GameState::new(800.0, 600.0, 1);
        let hoop_x = state.hoop.pos.x;
        state.set_bounds(1200.0, 900.0);
        assert_eq!(state.hoop.pos.x, hoop_x);
    }

    #[test]
    fn test_launch_clamps_spin() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut ball = Ball::at_spawn(&bounds);
        ball.launch(Vec2::new(6.0, 15.0), 42.0);
        assert!(ball.moving);
        assert_eq!(ball.spin, 10.0);
    }

    #[test]
    fn test_swish_amount_rests_at_both_ends() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut hoop = Hoop::new(&bounds);

        hoop.trigger_swish();
        assert_eq!(hoop.swish_amount(), 0.0);

        hoop.swish_progress = 0.5;
        assert!((hoop.swish_amount() - NET_HEIGHT * 0.5).abs() < 1e-4);

        hoop.swish_progress = 1.0;
        assert!(hoop.swish_amount().abs() < 1e-4);
    }

    #[test]
    fn test_swish_deactivates_and_resets() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut hoop = Hoop::new(&bounds);
        hoop.trigger_swish();

        for _ in 0..9 {
            hoop.step(&bounds);
            assert!(hoop.swishing);
        }
        hoop.step(&bounds);
        assert!(!hoop.swishing);
        assert_eq!(hoop.swish_progress, 0.0);
    }

    #[test]
    fn test_burst_size_and_velocity_ranges() {
        let mut state = GameState::new(800.0, 600.0, 99);
        state.spawn_burst(Vec2::new(100.0, 100.0));
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        for p in &state.particles {
            assert!(p.vel.x > -3.0 && p.vel.x < 3.0);
            assert!(p.vel.y >= -20.0 && p.vel.y < -16.0);
            assert!(p.radius >= 2.0 && p.radius < 6.0);
            assert!(p.color < PARTICLE_PALETTE_SIZE);
            assert_eq!(p.life, PARTICLE_LIFE);
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(800.0, 600.0, 5);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"streak\":0"));
    }
}

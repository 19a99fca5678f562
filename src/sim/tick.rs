//! Per-frame simulation step
//!
//! One `tick` advances the whole game by exactly one animation frame, in the
//! fixed order: hoop patrol, ball flight, rim check, debris. Physics is in
//! per-frame units on purpose; there is no delta-time scaling.

use glam::Vec2;

use super::collision::rim_score;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Host-resolved input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Slingshot release from the drag tracker, if one happened this frame
    pub launch: Option<Launch>,
}

/// Velocity and charged spin handed to the ball on release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub vel: Vec2,
    pub spin: f32,
}

/// Advance the game state by one frame.
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.frame += 1;

    // A launch only takes while the ball is at rest; stray releases during
    // flight are dropped here even if the tracker let one through.
    if let Some(launch) = input.launch
        && !state.ball.moving
    {
        state.ball.launch(launch.vel, launch.spin);
    }

    state.hoop.step(&state.bounds);
    step_ball(state);
    check_rim(state);
    step_particles(state);
}

/// Free flight: gravity, wind, spin drift, side-wall bounces, and the
/// fall-out/miss path.
fn step_ball(state: &mut GameState) {
    if !state.ball.moving {
        return;
    }

    let wind = state.wind;
    let ball = &mut state.ball;

    ball.vel.y += GRAVITY_PER_FRAME;
    ball.vel.x += wind + ball.spin * SPIN_DRIFT;
    ball.pos += ball.vel;
    ball.rotation += ball.vel.x * ROLL_RATE;

    // Side walls reflect with restitution loss; friction eats half the spin
    if ball.pos.x + ball.radius > state.bounds.width || ball.pos.x - ball.radius < 0.0 {
        ball.vel.x *= -WALL_RESTITUTION;
        ball.spin *= WALL_SPIN_DAMPING;
    }

    // Fell out the bottom: break the streak (if any) and respawn
    if ball.pos.y - ball.radius > state.bounds.height {
        if state.scoreboard.streak > 0 {
            let broken = state.scoreboard.end_streak();
            state.events.push(GameEvent::Missed { broken_streak: broken });
        }
        state.reset_ball();
        state.recompute_difficulty();
    }
}

/// Scoring: runs the full made-shot sequence on rim overlap.
fn check_rim(state: &mut GameState) {
    if !rim_score(&state.ball, &state.hoop) {
        return;
    }

    let at = state.ball.pos;
    let streak = state.scoreboard.record_hit();
    state.events.push(GameEvent::Scored { streak });
    state.spawn_burst(at);
    state.hoop.trigger_swish();
    // Replacing the ball also guarantees this frame cannot score twice
    state.reset_ball();
    state.recompute_difficulty();
}

fn step_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= 1;
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn launch_input(vx: f32, vy: f32, spin: f32) -> FrameInput {
        FrameInput {
            launch: Some(Launch {
                vel: Vec2::new(vx, vy),
                spin,
            }),
        }
    }

    /// Park the ball mid-band, descending, dead center of the rim.
    fn place_in_rim(state: &mut GameState) {
        state.ball.pos = Vec2::new(
            state.hoop.pos.x + state.hoop.width / 2.0,
            state.hoop.pos.y - 3.0,
        );
        state.ball.vel = Vec2::new(0.0, 2.0);
        state.ball.moving = true;
    }

    #[test]
    fn test_launch_only_from_rest() {
        let mut state = GameState::new(W, H, 1);
        tick(&mut state, &launch_input(2.0, -10.0, 0.0));
        assert!(state.ball.moving);
        let vel_before = state.ball.vel;

        // A second launch mid-flight must be dropped
        tick(&mut state, &launch_input(50.0, 50.0, 0.0));
        assert_ne!(state.ball.vel, Vec2::new(50.0, 50.0));
        // One more frame of gravity, no wind at streak 0
        assert_eq!(state.ball.vel.y, vel_before.y + GRAVITY_PER_FRAME);
    }

    #[test]
    fn test_free_fall_integration() {
        let mut state = GameState::new(W, H, 1);
        let start = state.ball.pos;
        tick(&mut state, &launch_input(0.0, 0.0, 0.0));
        // vy picks up one gravity step before the position integrates
        assert_eq!(state.ball.vel.y, GRAVITY_PER_FRAME);
        assert_eq!(state.ball.pos.y, start.y + GRAVITY_PER_FRAME);
        assert_eq!(state.ball.pos.x, start.x);
    }

    #[test]
    fn test_spin_curves_flight_and_rolls_ball() {
        let mut state = GameState::new(W, H, 1);
        tick(&mut state, &launch_input(0.0, -5.0, 10.0));
        assert_eq!(state.ball.vel.x, 10.0 * SPIN_DRIFT);
        assert_eq!(state.ball.rotation, state.ball.vel.x * ROLL_RATE);
    }

    #[test]
    fn test_wall_bounce_reflects_and_damps_spin() {
        let mut state = GameState::new(W, H, 1);
        state.ball.pos = Vec2::new(W - 30.0, 300.0);
        state.ball.vel = Vec2::new(10.0, 0.0);
        state.ball.spin = 8.0;
        state.ball.moving = true;

        tick(&mut state, &FrameInput::default());

        // 10 + spin drift carried the ball past the wall, then reflected
        assert!(state.ball.vel.x < 0.0);
        assert!((state.ball.vel.x + (10.0 + 8.0 * SPIN_DRIFT) * WALL_RESTITUTION).abs() < 1e-4);
        assert_eq!(state.ball.spin, 4.0);
    }

    #[test]
    fn test_miss_commits_streak_and_respawns() {
        let mut state = GameState::new(W, H, 1);
        state.scoreboard.streak = 6;
        state.scoreboard.high_score = 6;
        state.recompute_difficulty();
        assert_ne!(state.wind, 0.0);

        state.ball.pos = Vec2::new(400.0, H + 100.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        state.ball.moving = true;

        tick(&mut state, &FrameInput::default());

        assert_eq!(state.take_events(), vec![GameEvent::Missed { broken_streak: 6 }]);
        assert_eq!(state.scoreboard.streak, 0);
        assert_eq!(state.scoreboard.high_score, 6);
        assert!(!state.ball.moving);
        assert_eq!(state.ball.pos, state.bounds.spawn_point());
        // Difficulty drops straight back to baseline
        assert_eq!(state.wind, 0.0);
        assert_eq!(state.hoop.speed, 0.0);
    }

    #[test]
    fn test_fall_through_with_no_streak_is_silent() {
        let mut state = GameState::new(W, H, 1);
        state.scoreboard.high_score = 9;
        state.ball.pos = Vec2::new(400.0, H + 100.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        state.ball.moving = true;

        tick(&mut state, &FrameInput::default());

        assert!(state.take_events().is_empty());
        assert_eq!(state.scoreboard.high_score, 9);
        assert!(!state.ball.moving);
    }

    #[test]
    fn test_score_runs_full_sequence_once() {
        let mut state = GameState::new(W, H, 1);
        place_in_rim(&mut state);

        tick(&mut state, &FrameInput::default());

        assert_eq!(state.take_events(), vec![GameEvent::Scored { streak: 1 }]);
        assert_eq!(state.scoreboard.streak, 1);
        assert_eq!(state.scoreboard.high_score, 1);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert!(state.hoop.swishing);
        assert!(!state.ball.moving);
        assert_eq!(state.ball.pos, state.bounds.spawn_point());

        // The replaced ball is at rest, so the same frame's state can never
        // produce a second score
        tick(&mut state, &FrameInput::default());
        assert!(state.take_events().is_empty());
        assert_eq!(state.scoreboard.streak, 1);
    }

    #[test]
    fn test_first_score_keeps_baseline_difficulty() {
        let mut state = GameState::new(W, H, 1);
        place_in_rim(&mut state);
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.scoreboard.streak, 1);
        assert_eq!(state.wind, 0.0);
        assert_eq!(state.hoop.speed, 0.0);
    }

    #[test]
    fn test_tenth_score_starts_hoop_moving() {
        let mut state = GameState::new(W, H, 1);
        state.scoreboard.streak = 9;
        state.scoreboard.high_score = 9;
        place_in_rim(&mut state);

        tick(&mut state, &FrameInput::default());

        assert_eq!(state.scoreboard.streak, 10);
        assert_eq!(state.hoop.speed, 1.0);

        // Direction only flips on edge contact, not on recompute
        let dir = state.hoop.direction;
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.hoop.direction, dir);
    }

    #[test]
    fn test_hoop_patrol_reverses_at_margin() {
        let mut state = GameState::new(W, H, 1);
        state.hoop.speed = 2.0;
        state.hoop.pos.x = W - HOOP_EDGE_MARGIN - state.hoop.width - 1.0;
        state.hoop.direction = 1.0;

        tick(&mut state, &FrameInput::default());
        assert_eq!(state.hoop.direction, -1.0);

        // Backboard travels with the rim
        let gap = state.hoop.backboard.x - state.hoop.pos.x;
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.hoop.backboard.x - state.hoop.pos.x, gap);
    }

    #[test]
    fn test_particles_age_out() {
        let mut state = GameState::new(W, H, 1);
        state.spawn_burst(Vec2::new(100.0, 100.0));

        for _ in 0..(PARTICLE_LIFE - 1) {
            tick(&mut state, &FrameInput::default());
        }
        assert_eq!(state.particles.len(), PARTICLE_BURST);

        tick(&mut state, &FrameInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(W, H, 777);
        let mut b = GameState::new(W, H, 777);

        let inputs = [
            launch_input(3.0, -12.0, 4.0),
            FrameInput::default(),
            FrameInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.ball.vel, b.ball.vel);
        assert_eq!(a.wind, b.wind);
        assert_eq!(a.particles.len(), b.particles.len());
    }
}

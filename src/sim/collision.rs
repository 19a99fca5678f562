//! Rim overlap test
//!
//! The rim is an open band, not a solid body: the ball never bounces off it,
//! it either passes through scoring or sails past.

use super::state::{Ball, Hoop};
use crate::consts::RIM_BAND;

/// Pure scoring predicate, evaluated once per frame after the ball and hoop
/// have stepped.
///
/// A shot counts only while descending (`vel.y > 0`), so a ball rising
/// through the rim plane is never counted and a made shot cannot be counted
/// twice.
pub fn rim_score(ball: &Ball, hoop: &Hoop) -> bool {
    ball.moving
        && ball.vel.y > 0.0
        && ball.pos.y > hoop.pos.y - RIM_BAND
        && ball.pos.y < hoop.pos.y + RIM_BAND
        && ball.pos.x > hoop.pos.x
        && ball.pos.x < hoop.pos.x + hoop.width
}

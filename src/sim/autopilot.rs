//! Demo mode: a bot that jumps for the player
//!
//! Jumps once the nearest approaching obstacle is a few ticks away. With the
//! default tuning the player is above the tallest obstacle within seven
//! ticks, so eight ticks of lead clears everything the spawner produces.

use super::state::{Obstacle, Player};

/// Ticks of warning before an obstacle reaches the player
pub const LEAD_TICKS: f32 = 8.0;

/// Gap between the player's right edge and the nearest obstacle still ahead
pub fn gap_to_next(player: &Player, obstacles: &[Obstacle]) -> Option<f32> {
    let front = player.x + player.width;
    obstacles
        .iter()
        .filter(|o| o.x + o.width > player.x)
        .map(|o| o.x - front)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Whether the bot wants to jump this tick
pub fn should_jump(player: &Player, obstacles: &[Obstacle], speed: f32) -> bool {
    if player.airborne {
        return false;
    }
    match gap_to_next(player, obstacles) {
        Some(gap) => gap > 0.0 && gap <= speed * LEAD_TICKS,
        None => false,
    }
}

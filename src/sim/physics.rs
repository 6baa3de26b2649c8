//! Vertical motion for the player
//!
//! Explicit Euler, one step per tick. Gravity is a fixed per-tick velocity
//! change; the ground plane is the only boundary.

use super::state::Player;

/// Start a jump if the player is on the ground. Returns whether it started.
pub fn try_jump(player: &mut Player, impulse: f32) -> bool {
    if player.airborne {
        return false;
    }
    player.vel_y = impulse;
    player.airborne = true;
    true
}

/// Advance the player by one tick
pub fn integrate(player: &mut Player, gravity: f32) {
    player.vel_y -= gravity;
    player.y += player.vel_y;

    // Ground clamp
    if player.y < 0.0 {
        player.y = 0.0;
        player.vel_y = 0.0;
        player.airborne = false;
    }
}

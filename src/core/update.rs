use tracing::{debug, error};

use crate::core::Tile::{Crate, CrateOnGoal, Ground, Wall};
use crate::core::{
    CratePush, Direction, Grid, MoveOutcome, MoveTransition, OutOfBounds, Player, RejectReason, Tile, is_victory,
};

/// Resolves one directional intent against the grid and commits it.
///
/// On acceptance the grid relabel and the player's tile position are written before
/// returning; rejected moves leave both untouched. Input gating (animations, cooldown,
/// won levels) is the engine's job, not this function's.
pub fn attempt_move(grid: &mut Grid, player: &mut Player, direction: Direction) -> MoveOutcome {
    match resolve(grid, player, direction) {
        Ok(outcome) => {
            match &outcome {
                MoveOutcome::Rejected(reason) => debug!(?direction, ?reason, "move rejected"),
                accepted => debug!(?direction, outcome = ?accepted, "move accepted"),
            }
            outcome
        }
        Err(err) => {
            // Every written cell was read successfully first, so this means a resolver bug.
            error!(%err, ?direction, "move resolution left the grid");
            MoveOutcome::Rejected(RejectReason::Blocked)
        }
    }
}

fn resolve(grid: &mut Grid, player: &mut Player, direction: Direction) -> Result<MoveOutcome, OutOfBounds> {
    let delta = direction.delta();
    let from = player.position;
    let target = from + delta;

    let Ok(target_tile) = grid.tile_at(target) else {
        return Ok(MoveOutcome::Rejected(RejectReason::Blocked));
    };

    let push = match target_tile {
        Wall => return Ok(MoveOutcome::Rejected(RejectReason::Blocked)),
        // Bare goal cells are Ground too; the player may stand on them.
        Ground => None,
        Crate | CrateOnGoal => {
            let beyond = target + delta;
            let Ok(beyond_tile) = grid.tile_at(beyond) else {
                return Ok(MoveOutcome::Rejected(RejectReason::CrateBlocked));
            };
            match beyond_tile {
                Wall | Crate | CrateOnGoal => return Ok(MoveOutcome::Rejected(RejectReason::CrateBlocked)),
                Ground => {}
            }

            grid.set_tile(target, Ground)?;
            grid.set_tile(beyond, Tile::crate_for(grid.is_goal_at(beyond)))?;
            Some(CratePush { from: target, to: beyond })
        }
    };

    player.position = target;
    player.facing = direction;

    let victory = push.is_some() && is_victory(grid);
    let transition = MoveTransition {
        direction,
        delta,
        player_from: from,
        player_to: target,
        push,
        victory,
    };

    Ok(if victory {
        MoveOutcome::VictoryReached(transition)
    } else if push.is_some() {
        MoveOutcome::CratePushed(transition)
    } else {
        MoveOutcome::PlayerMoved(transition)
    })
}

//! Per-frame simulation tick
//!
//! One call per displayed frame while a round is being played.

use serde::{Deserialize, Serialize};

use super::collision::first_overlap;
use super::state::{Outcome, Round};

/// Something that ended the round on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Actor overlapped the obstacle at this index
    Collided { obstacle: usize },
    /// Actor stood on the goal row
    Reached,
}

/// Advance the round by one tick.
///
/// Obstacles move first, then the actor is tested against them, then the
/// goal row is checked. A finished round is left untouched.
pub fn tick(round: &mut Round) -> Option<RoundEvent> {
    if round.outcome.is_over() {
        return None;
    }
    round.time_ticks += 1;

    for obstacle in &mut round.obstacles {
        obstacle.advance();
    }

    // Loss wins the tie: a lost round is never also won
    if let Some(index) = first_overlap(&round.actor.rect(), &round.obstacles) {
        round.outcome = Outcome::Lost;
        log::info!(
            "Round lost after {} ticks (hit obstacle {} in row {})",
            round.time_ticks,
            index,
            round.obstacles[index].row
        );
        return Some(RoundEvent::Collided { obstacle: index });
    }

    if round.actor.row() == 0 {
        round.outcome = Outcome::Won;
        log::info!("Round won after {} ticks", round.time_ticks);
        return Some(RoundEvent::Reached);
    }

    None
}

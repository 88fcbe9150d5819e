//! Turn order within a round.
//!
//! The rotation borrows the roster for the duration of a round and walks it
//! circularly, skipping players who have left the cave. The only way to
//! change a player's choice through the rotation is `exit`, so a player who
//! left can never come back within the same round.

use crate::error::GameError;
use crate::player::{PlayerId, PlayerInRound};

/// Rotation over the active players of a fixed roster
#[derive(Debug)]
pub struct RoundRotation<'p> {
    players: &'p mut [PlayerInRound],
    /// Roster index checked first by the next call to `next`
    cursor: usize,
}

impl<'p> RoundRotation<'p> {
    /// Start a rotation. Every player must still be in the cave, and every
    /// roster index must fit in a `PlayerId`.
    pub fn new(players: &'p mut [PlayerInRound]) -> Result<Self, GameError> {
        if players.len() > usize::from(PlayerId::MAX) + 1 {
            return Err(GameError::TooManyPlayers(players.len()));
        }
        if let Some(exited) = players.iter().find(|p| p.has_exited()) {
            return Err(GameError::PlayerAlreadyExited(exited.name.clone()));
        }
        Ok(Self { players, cursor: 0 })
    }

    /// Advance to the next active player in roster order, wrapping around
    pub fn next(&mut self) -> Result<PlayerId, GameError> {
        let len = self.players.len();
        for _ in 0..len {
            let candidate = self.cursor;
            self.cursor = (self.cursor + 1) % len;

            if !self.players[candidate].has_exited() {
                return PlayerId::try_from(candidate)
                    .map_err(|_| GameError::TooManyPlayers(len));
            }
        }
        Err(GameError::NoActivePlayers)
    }

    /// Check if at least one player is still in the cave
    pub fn has_next(&self) -> bool {
        self.players.iter().any(|p| !p.has_exited())
    }

    /// Players still in the cave, in roster order
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.ids_where(|p| !p.has_exited())
    }

    /// Players who left the cave, in roster order
    pub fn exited_players(&self) -> Vec<PlayerId> {
        self.ids_where(PlayerInRound::has_exited)
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.has_exited()).count()
    }

    pub fn exited_count(&self) -> usize {
        self.players.len() - self.active_count()
    }

    /// Whole roster, in order
    pub fn players(&self) -> &[PlayerInRound] {
        &self.players[..]
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Result<&PlayerInRound, GameError> {
        self.players
            .get(id as usize)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerInRound, GameError> {
        self.players
            .get_mut(id as usize)
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Take a player out of the cave
    pub fn exit(&mut self, id: PlayerId) -> Result<(), GameError> {
        let player = self.player_mut(id)?;
        if !player.exit() {
            return Err(GameError::PlayerAlreadyExited(player.name.clone()));
        }
        Ok(())
    }

    fn ids_where(&self, filter: impl Fn(&PlayerInRound) -> bool) -> Vec<PlayerId> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| filter(*p))
            .filter_map(|(i, _)| PlayerId::try_from(i).ok())
            .collect()
    }
}

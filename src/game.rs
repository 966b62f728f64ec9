use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::{
    board::{Board, BoardSnapshot, Viewer},
    common::{Coord, PlayerId, SessionError, SetupError},
    config::{RepeatShotPolicy, SessionConfig},
    fleet::{FleetTracker, PlayerRecord},
    resolver::{self, AttackOutcome},
    ship::ShipType,
    turn::{TurnCoordinator, TurnPhase},
};

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl MatchOutcome {
    pub fn win_for(player: PlayerId) -> Self {
        match player {
            PlayerId::One => MatchOutcome::Player1Wins,
            PlayerId::Two => MatchOutcome::Player2Wins,
        }
    }

    /// Decide a match by comparing how many ships each player sank.
    pub fn from_sunk_counts(player1: usize, player2: usize) -> Self {
        match player1.cmp(&player2) {
            core::cmp::Ordering::Greater => MatchOutcome::Player1Wins,
            core::cmp::Ordering::Less => MatchOutcome::Player2Wins,
            core::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn winner(self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Player1Wins => Some(PlayerId::One),
            MatchOutcome::Player2Wins => Some(PlayerId::Two),
            MatchOutcome::Draw => None,
        }
    }
}

/// What an actor sees when it is woken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStatus {
    /// The caller holds the turn.
    Active(TurnView),
    /// The match ended; `None` when it was abandoned without a result.
    Finished(Option<MatchOutcome>),
}

/// Board views handed to the active player at the start of a shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub player: PlayerId,
    pub shots_remaining: usize,
    /// The player's own waters, ships revealed.
    pub own: BoardSnapshot,
    /// The opponent's waters under fog of war.
    pub target: BoardSnapshot,
}

/// Result of a submitted attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub coord: Coord,
    pub outcome: AttackOutcome,
    /// Shots the attacker has left in the streak, after any reset.
    pub shots_remaining: usize,
    /// Whether this attack handed the turn to the opponent.
    pub turn_passed: bool,
    /// Set when this attack concluded the match.
    pub match_outcome: Option<MatchOutcome>,
}

/// Serializable end-of-match summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub outcome: Option<MatchOutcome>,
    pub board_size: usize,
    pub players: [PlayerSummary; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub sunk_count: usize,
    pub shots_fired: usize,
    /// Ships of this player still afloat.
    pub ships_remaining: usize,
}

/// Mutable match state, only reachable through the turn coordinator.
struct Match {
    boards: [Board; 2],
    fleets: [FleetTracker; 2],
    players: [PlayerRecord; 2],
    outcome: Option<MatchOutcome>,
    shots_fired: usize,
}

/// One match between two players, shared by both actors.
pub struct GameSession {
    config: SessionConfig,
    turns: TurnCoordinator<Match>,
}

impl GameSession {
    /// Set up a match with both fleets placed at random.
    pub fn new<R: Rng>(config: SessionConfig, rng: &mut R) -> Result<Self, SetupError> {
        config.validate()?;
        let mut boards = [
            Board::new(config.board_size),
            Board::new(config.board_size),
        ];
        for player in PlayerId::BOTH {
            boards[player.index()]
                .place_fleet(rng, &config.fleet, config.placement_attempts)
                .map_err(|source| SetupError::PlacementFailure { player, source })?;
        }
        Self::with_boards(config, boards)
    }

    /// Set up a match from prepared boards, indexed by player.
    ///
    /// Each board must be untouched and hold exactly the configured fleet.
    pub fn with_boards(config: SessionConfig, boards: [Board; 2]) -> Result<Self, SetupError> {
        config.validate()?;
        for player in PlayerId::BOTH {
            let board = &boards[player.index()];
            if board.size() != config.board_size {
                return Err(SetupError::BoardSizeMismatch {
                    player,
                    expected: config.board_size,
                    actual: board.size(),
                });
            }
            if !board.is_untouched() {
                return Err(SetupError::BoardAlreadyAttacked { player });
            }
            if !holds_fleet(board, &config.fleet) {
                return Err(SetupError::IncompleteFleet { player });
            }
        }
        let fleets = [FleetTracker::new(&boards[0]), FleetTracker::new(&boards[1])];
        let players = PlayerId::BOTH.map(|p| PlayerRecord::new(p, config.shot_budget));
        info!(
            "Session ready: {0}x{0} board, {1} ships per side, {2} shots per turn",
            config.board_size,
            config.fleet.len(),
            config.shot_budget
        );
        Ok(Self {
            config,
            turns: TurnCoordinator::new(Match {
                boards,
                fleets,
                players,
                outcome: None,
                shots_fired: 0,
            }),
        })
    }

    /// Block until `player` holds the turn or the match is over.
    pub fn await_turn(&self, player: PlayerId) -> TurnStatus {
        let turns = self.turns.await_turn(player);
        match turns.phase() {
            TurnPhase::GameOver => TurnStatus::Finished(turns.outcome),
            TurnPhase::WaitingFor(_) => TurnStatus::Active(TurnView {
                player,
                shots_remaining: turns.players[player.index()].shots_remaining,
                own: turns.boards[player.index()].snapshot_for(Viewer::Owner),
                target: turns.boards[player.opponent().index()].snapshot_for(Viewer::Opponent),
            }),
        }
    }

    /// Fire at `coord` on the opponent's board.
    pub fn submit_attack(
        &self,
        player: PlayerId,
        coord: Coord,
    ) -> Result<AttackReport, SessionError> {
        let mut turns = self.turns.lock();
        match turns.phase() {
            TurnPhase::GameOver => return Err(SessionError::GameOver),
            TurnPhase::WaitingFor(active) if active != player => {
                return Err(SessionError::NotYourTurn(player))
            }
            TurnPhase::WaitingFor(_) => {}
        }

        let target = player.opponent().index();
        let m = &mut *turns;
        let record = &mut m.players[player.index()];
        let outcome = resolver::resolve(&mut m.boards[target], &mut m.fleets[target], record, coord);

        let ends_streak = match &outcome {
            AttackOutcome::OutOfBounds => {
                return Err(SessionError::InvalidCoordinate {
                    coord,
                    size: self.config.board_size,
                })
            }
            AttackOutcome::Hit { .. } => spend_shot(record),
            AttackOutcome::Miss => {
                record.shots_fired += 1;
                true
            }
            AttackOutcome::AlreadyAttacked => match self.config.repeat_shot {
                RepeatShotPolicy::EndsTurn => {
                    record.shots_fired += 1;
                    true
                }
                RepeatShotPolicy::ConsumesShot => spend_shot(record),
                RepeatShotPolicy::Free => false,
            },
        };
        if let AttackOutcome::Hit { sunk } = &outcome {
            for name in sunk {
                info!("{} sank {}'s {}", player, player.opponent(), name);
            }
        }
        m.shots_fired = m.players.iter().map(|p| p.shots_fired).sum();

        let match_outcome = if m.fleets[target].remaining_ships() == 0 {
            Some(MatchOutcome::win_for(player))
        } else {
            match self.config.shot_limit {
                Some(limit) if m.shots_fired >= limit => Some(MatchOutcome::from_sunk_counts(
                    m.players[0].sunk_count,
                    m.players[1].sunk_count,
                )),
                _ => None,
            }
        };

        let mut turn_passed = false;
        if let Some(result) = match_outcome {
            m.outcome = Some(result);
            if turns.end_game() {
                info!("Game over after {} shots: {:?}", turns.shots_fired, result);
            }
        } else if ends_streak {
            m.players[player.index()].shots_remaining = self.config.shot_budget;
            turn_passed = true;
            if let Some(next) = turns.yield_turn() {
                debug!("Turn passes from {} to {}", player, next);
            }
        }

        Ok(AttackReport {
            attacker: player,
            coord,
            outcome,
            shots_remaining: turns.players[player.index()].shots_remaining,
            turn_passed,
            match_outcome,
        })
    }

    /// End the match without a result, waking any waiting actor.
    pub fn abandon(&self) {
        let mut turns = self.turns.lock();
        if turns.end_game() {
            warn!("Match abandoned before a result was reached");
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.turns.phase()
    }

    /// Player holding the turn, or `None` once the match is over.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase().active_player()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.turns.lock().outcome
    }

    /// Ships still afloat on `side`'s board.
    pub fn remaining_ships(&self, side: PlayerId) -> usize {
        self.turns.lock().fleets[side.index()].remaining_ships()
    }

    /// Enemy ships `player` has sunk.
    pub fn sunk_count(&self, player: PlayerId) -> usize {
        self.player(player).sunk_count
    }

    pub fn player(&self, player: PlayerId) -> PlayerRecord {
        self.turns.lock().players[player.index()]
    }

    /// View of `side`'s board as seen by `viewer`, taken under the session lock.
    pub fn snapshot(&self, side: PlayerId, viewer: Viewer) -> BoardSnapshot {
        self.turns.lock().boards[side.index()].snapshot_for(viewer)
    }

    pub fn summary(&self) -> MatchSummary {
        let turns = self.turns.lock();
        MatchSummary {
            outcome: turns.outcome,
            board_size: self.config.board_size,
            players: PlayerId::BOTH.map(|p| PlayerSummary {
                id: p,
                sunk_count: turns.players[p.index()].sunk_count,
                shots_fired: turns.players[p.index()].shots_fired,
                ships_remaining: turns.fleets[p.index()].remaining_ships(),
            }),
        }
    }
}

/// Use one shot of the streak; `true` when the budget is exhausted.
fn spend_shot(record: &mut PlayerRecord) -> bool {
    record.shots_fired += 1;
    record.shots_remaining = record.shots_remaining.saturating_sub(1);
    record.shots_remaining == 0
}

fn holds_fleet(board: &Board, fleet: &[ShipType]) -> bool {
    let key = |s: &ShipType| (s.name(), s.length());
    let mut placed: Vec<_> = board.ships().iter().map(|s| key(&s.ship_type())).collect();
    let mut wanted: Vec<_> = fleet.iter().map(key).collect();
    placed.sort_unstable();
    wanted.sort_unstable();
    let cells: usize = fleet.iter().map(|s| s.length()).sum();
    placed == wanted && board.occupied_count() == cells
}

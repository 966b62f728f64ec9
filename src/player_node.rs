use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, warn};

use crate::{
    common::{InputError, PlayerId, SessionError},
    game::{AttackReport, GameSession, MatchOutcome, MatchSummary, TurnStatus},
    output::{GameEvent, OutputSink},
    player::InputProvider,
    resolver::AttackOutcome,
};

/// Drives one player through a match: wait for the turn, ask for a target,
/// fire, report, repeat until the match is over.
pub struct PlayerActor {
    id: PlayerId,
    session: Arc<GameSession>,
    input: Box<dyn InputProvider>,
    output: Box<dyn OutputSink>,
}

impl PlayerActor {
    pub fn new(
        id: PlayerId,
        session: Arc<GameSession>,
        input: Box<dyn InputProvider>,
        output: Box<dyn OutputSink>,
    ) -> Self {
        Self {
            id,
            session,
            input,
            output,
        }
    }

    /// Play until the match ends. Returns the outcome seen by this player.
    ///
    /// If the input provider closes, the match is abandoned so the opponent's
    /// actor is released, and an error is returned. Any other early exit,
    /// a panic included, abandons the match as well.
    pub fn run(&mut self) -> anyhow::Result<Option<MatchOutcome>> {
        let _abandon = AbandonOnExit(Arc::clone(&self.session));
        loop {
            let view = match self.session.await_turn(self.id) {
                TurnStatus::Finished(outcome) => {
                    self.output.notify(GameEvent::conclusion(outcome));
                    return Ok(outcome);
                }
                TurnStatus::Active(view) => view,
            };
            self.output.notify(GameEvent::TurnStarted {
                player: self.id,
                shots_remaining: view.shots_remaining,
                own: view.own,
                target: view.target,
            });

            // The session lock is not held while waiting for input.
            let coord = match self.input.next_coordinate(self.id) {
                Ok(coord) => coord,
                Err(InputError::InvalidInput(reason)) => {
                    warn!("{}: {}", self.id, reason);
                    self.output.notify(GameEvent::InvalidInput {
                        player: self.id,
                        reason,
                    });
                    continue;
                }
                Err(InputError::Closed) => {
                    return Err(anyhow!("input for {} closed before the match ended", self.id));
                }
            };

            match self.session.submit_attack(self.id, coord) {
                Ok(report) => self.report(report),
                Err(SessionError::InvalidCoordinate { coord, .. }) => {
                    self.output.notify(GameEvent::InvalidCoordinate {
                        player: self.id,
                        coord,
                    });
                }
                // The turn moved on without us; waiting again sorts it out.
                Err(e @ (SessionError::NotYourTurn(_) | SessionError::GameOver)) => {
                    debug!("{}: attack rejected: {}", self.id, e);
                }
            }
        }
    }

    fn report(&mut self, report: AttackReport) {
        let player = report.attacker;
        let coord = report.coord;
        match report.outcome {
            AttackOutcome::Hit { sunk } => {
                self.output.notify(GameEvent::Hit { player, coord });
                for ship in sunk {
                    self.output.notify(GameEvent::Sunk { player, ship });
                }
            }
            AttackOutcome::Miss => self.output.notify(GameEvent::Miss { player, coord }),
            AttackOutcome::AlreadyAttacked => {
                self.output.notify(GameEvent::AlreadyAttacked { player, coord })
            }
            AttackOutcome::OutOfBounds => {
                self.output.notify(GameEvent::InvalidCoordinate { player, coord })
            }
        }
        if report.turn_passed {
            self.output.notify(GameEvent::TurnPassed {
                from: player,
                to: player.opponent(),
            });
        }
    }
}

/// Ends the match when an actor leaves its loop; a no-op once it is already over.
struct AbandonOnExit(Arc<GameSession>);

impl Drop for AbandonOnExit {
    fn drop(&mut self) {
        self.0.abandon();
    }
}

/// Run both actors to completion on blocking tasks and summarize the match.
pub async fn play_match(
    session: Arc<GameSession>,
    mut first: PlayerActor,
    mut second: PlayerActor,
) -> anyhow::Result<MatchSummary> {
    let first = tokio::task::spawn_blocking(move || first.run());
    let second = tokio::task::spawn_blocking(move || second.run());
    let (first, second) = tokio::try_join!(first, second)?;
    first?;
    second?;
    Ok(session.summary())
}

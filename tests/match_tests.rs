use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use salvo::{
    play_match, Board, Coord, GameEvent, GameSession, InputError, MatchOutcome, Orientation,
    OutputSink, PlayerActor, PlayerId, RandomInput, RecordingSink, ScriptedInput, SessionConfig, ShipType,
    TurnPhase, SHIPS,
};
use tokio::time::timeout;

const LIMIT: Duration = Duration::from_secs(10);

fn destroyer_session(budget: usize) -> Arc<GameSession> {
    let ship = ShipType::new("Destroyer", 2);
    let board = || {
        let mut board = Board::new(5);
        board
            .place(ship, Coord::new(2, 1), Orientation::Horizontal)
            .unwrap();
        board
    };
    let config = SessionConfig::default()
        .with_board_size(5)
        .with_shot_budget(budget)
        .with_fleet(vec![ship]);
    Arc::new(GameSession::with_boards(config, [board(), board()]).unwrap())
}

fn scripted(
    id: PlayerId,
    session: &Arc<GameSession>,
    entries: Vec<Result<Coord, InputError>>,
) -> (PlayerActor, RecordingSink) {
    let sink = RecordingSink::new();
    let actor = PlayerActor::new(
        id,
        Arc::clone(session),
        Box::new(ScriptedInput::from_entries(entries)),
        Box::new(sink.clone()),
    );
    (actor, sink)
}

fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(*e)).count()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_winner_ends_match_and_loser_exits() -> anyhow::Result<()> {
    let session = destroyer_session(3);
    let (p1, sink1) = scripted(PlayerId::One, &session, vec![Ok(Coord::new(0, 0))]);
    let (p2, sink2) = scripted(
        PlayerId::Two,
        &session,
        vec![Ok(Coord::new(2, 1)), Ok(Coord::new(2, 2))],
    );

    let summary = timeout(LIMIT, play_match(Arc::clone(&session), p1, p2)).await??;
    assert_eq!(summary.outcome, Some(MatchOutcome::Player2Wins));
    assert_eq!(summary.players[0].shots_fired, 1);
    assert_eq!(summary.players[1].shots_fired, 2);
    assert_eq!(summary.players[1].sunk_count, 1);
    assert_eq!(summary.players[0].ships_remaining, 0);

    let events1 = sink1.events();
    assert!(events1.contains(&GameEvent::Miss {
        player: PlayerId::One,
        coord: Coord::new(0, 0)
    }));
    assert!(events1.contains(&GameEvent::TurnPassed {
        from: PlayerId::One,
        to: PlayerId::Two
    }));
    assert_eq!(
        events1.last(),
        Some(&GameEvent::Victory {
            winner: PlayerId::Two
        })
    );

    let events2 = sink2.events();
    assert_eq!(count(&events2, |e| matches!(e, GameEvent::Hit { .. })), 2);
    assert!(events2.contains(&GameEvent::Sunk {
        player: PlayerId::Two,
        ship: "Destroyer"
    }));
    assert_eq!(
        count(&events2, |e| matches!(e, GameEvent::TurnStarted { .. })),
        2
    );
    assert_eq!(
        events2.last(),
        Some(&GameEvent::Victory {
            winner: PlayerId::Two
        })
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_input_retries_same_turn() -> anyhow::Result<()> {
    let session = destroyer_session(3);
    let (p1, sink1) = scripted(
        PlayerId::One,
        &session,
        vec![
            Err(InputError::InvalidInput("x".into())),
            Ok(Coord::new(9, 9)),
            Ok(Coord::new(2, 1)),
            Ok(Coord::new(2, 2)),
        ],
    );
    let (p2, sink2) = scripted(PlayerId::Two, &session, vec![]);

    let summary = timeout(LIMIT, play_match(Arc::clone(&session), p1, p2)).await??;
    assert_eq!(summary.outcome, Some(MatchOutcome::Player1Wins));
    assert_eq!(summary.players[0].shots_fired, 2);

    let events1 = sink1.events();
    assert!(events1.contains(&GameEvent::InvalidInput {
        player: PlayerId::One,
        reason: "x".into()
    }));
    assert!(events1.contains(&GameEvent::InvalidCoordinate {
        player: PlayerId::One,
        coord: Coord::new(9, 9)
    }));
    assert_eq!(
        count(&events1, |e| matches!(e, GameEvent::TurnPassed { .. })),
        0
    );
    // player two never held the turn
    assert_eq!(
        sink2.events(),
        vec![GameEvent::Victory {
            winner: PlayerId::One
        }]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_input_abandons_match() {
    let session = destroyer_session(1);
    let (p1, sink1) = scripted(PlayerId::One, &session, vec![Ok(Coord::new(0, 0))]);
    let (p2, _sink2) = scripted(PlayerId::Two, &session, vec![]);

    let result = timeout(LIMIT, play_match(Arc::clone(&session), p1, p2))
        .await
        .expect("both actors should exit");
    assert!(result.is_err());
    assert_eq!(session.outcome(), None);
    assert_eq!(session.phase(), TurnPhase::GameOver);
    assert_eq!(sink1.events().last(), Some(&GameEvent::Abandoned));
}

struct FailingSink;

impl OutputSink for FailingSink {
    fn notify(&mut self, event: GameEvent) {
        if matches!(event, GameEvent::TurnStarted { .. }) {
            panic!("display went away");
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_panicking_actor_releases_opponent() {
    let session = destroyer_session(1);
    let mut p1 = PlayerActor::new(
        PlayerId::One,
        Arc::clone(&session),
        Box::new(ScriptedInput::new([Coord::new(0, 0)])),
        Box::new(FailingSink),
    );
    let (mut p2, sink2) = scripted(PlayerId::Two, &session, vec![Ok(Coord::new(2, 1))]);

    let first = tokio::task::spawn_blocking(move || p1.run());
    let second = tokio::task::spawn_blocking(move || p2.run());

    assert!(timeout(LIMIT, first).await.unwrap().is_err());
    let outcome = timeout(LIMIT, second)
        .await
        .expect("opponent should be released")
        .unwrap()
        .unwrap();
    assert_eq!(outcome, None);
    assert_eq!(session.phase(), TurnPhase::GameOver);
    assert_eq!(sink2.events(), vec![GameEvent::Abandoned]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_random_match_runs_to_completion() -> anyhow::Result<()> {
    let mut rng = SmallRng::seed_from_u64(2024);
    let config = SessionConfig::default();
    let size = config.board_size;
    let session = Arc::new(GameSession::new(config, &mut rng)?);

    let actors = PlayerId::BOTH.map(|id| {
        let shooter = RandomInput::new(SmallRng::seed_from_u64(id.number() as u64), size);
        PlayerActor::new(
            id,
            Arc::clone(&session),
            Box::new(shooter),
            Box::new(RecordingSink::new()),
        )
    });
    let [p1, p2] = actors;

    let summary = timeout(LIMIT, play_match(Arc::clone(&session), p1, p2)).await??;
    let winner = summary
        .outcome
        .and_then(|o| o.winner())
        .expect("a full match has a winner");
    assert_eq!(session.sunk_count(winner), SHIPS.len());
    assert_eq!(session.remaining_ships(winner.opponent()), 0);
    assert!(session.remaining_ships(winner) > 0);
    Ok(())
}

use std::sync::Arc;

use log::LevelFilter;
use rand::{rngs::SmallRng, SeedableRng};
use salvo::{
    init_logging_with_default, play_match, GameSession, PlayerActor, PlayerId, RandomInput,
    RecordingSink, SessionConfig,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging_with_default(LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let config = SessionConfig::default();
    let size = config.board_size;
    let mut setup_rng = SmallRng::seed_from_u64(seed1 ^ seed2.rotate_left(32));
    let session = Arc::new(GameSession::new(config, &mut setup_rng)?);

    let p1 = PlayerActor::new(
        PlayerId::One,
        Arc::clone(&session),
        Box::new(RandomInput::new(SmallRng::seed_from_u64(seed1), size)),
        Box::new(RecordingSink::new()),
    );
    let p2 = PlayerActor::new(
        PlayerId::Two,
        Arc::clone(&session),
        Box::new(RandomInput::new(SmallRng::seed_from_u64(seed2), size)),
        Box::new(RecordingSink::new()),
    );

    let summary = play_match(session, p1, p2).await?;

    let winner = summary
        .outcome
        .and_then(|o| o.winner())
        .map(|p| format!("player{}", p.number()));
    let [s1, s2] = &summary.players;

    let result = json!({
        "player1": {"sunk": s1.sunk_count, "shots": s1.shots_fired},
        "player2": {"sunk": s2.sunk_count, "shots": s2.shots_fired},
        "outcome": summary.outcome,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use salvo::{
    init_logging, play_match, ConsoleInput, ConsoleSink, GameSession, MatchOutcome,
    MatchSummary, PlayerActor, PlayerId, RandomInput, RepeatShotPolicy, SessionConfig,
    BOARD_SIZE, SHOT_BUDGET,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RepeatShot {
    /// Firing at a resolved cell ends the turn, like a miss.
    EndsTurn,
    /// Firing at a resolved cell uses one shot of the streak.
    ConsumesShot,
    /// Firing at a resolved cell costs nothing.
    Free,
}

impl From<RepeatShot> for RepeatShotPolicy {
    fn from(value: RepeatShot) -> Self {
        match value {
            RepeatShot::EndsTurn => RepeatShotPolicy::EndsTurn,
            RepeatShot::ConsumesShot => RepeatShotPolicy::ConsumesShot,
            RepeatShot::Free => RepeatShotPolicy::Free,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct MatchArgs {
    #[arg(long, default_value_t = BOARD_SIZE, help = "Side length of each square board")]
    size: usize,
    #[arg(long, default_value_t = SHOT_BUDGET, help = "Consecutive shots per turn")]
    shots: usize,
    #[arg(long, value_enum, default_value_t = RepeatShot::EndsTurn)]
    repeat_shot: RepeatShot,
    #[arg(long, help = "End the match after this many shots and compare sunk ships")]
    shot_limit: Option<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Two players take turns on this terminal.
    Hotseat(MatchArgs),
    /// Watch two random shooters play each other.
    Watch(MatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let summary = match cli.command {
        Commands::Hotseat(args) => {
            let (session, _) = start(&args)?;
            let p1 = PlayerActor::new(
                PlayerId::One,
                Arc::clone(&session),
                Box::new(ConsoleInput::stdin()),
                Box::new(ConsoleSink),
            );
            let p2 = PlayerActor::new(
                PlayerId::Two,
                Arc::clone(&session),
                Box::new(ConsoleInput::stdin()),
                Box::new(ConsoleSink),
            );
            play_match(session, p1, p2).await?
        }
        Commands::Watch(args) => {
            let (session, mut rng) = start(&args)?;
            let [p1, p2] = PlayerId::BOTH.map(|id| {
                let shooter = RandomInput::new(SmallRng::seed_from_u64(rng.random()), args.size);
                PlayerActor::new(id, Arc::clone(&session), Box::new(shooter), Box::new(ConsoleSink))
            });
            play_match(session, p1, p2).await?
        }
    };
    print_summary(&summary);
    Ok(())
}

fn start(args: &MatchArgs) -> anyhow::Result<(Arc<GameSession>, SmallRng)> {
    if let Some(s) = args.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = match args.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };
    let config = SessionConfig::default()
        .with_board_size(args.size)
        .with_shot_budget(args.shots)
        .with_repeat_shot(args.repeat_shot.into())
        .with_shot_limit(args.shot_limit);
    let session = GameSession::new(config, &mut rng)?;
    Ok((Arc::new(session), rng))
}

fn print_summary(summary: &MatchSummary) {
    println!("\n=================== GAME OVER ===================");
    for player in &summary.players {
        println!(
            "Final result: {} sank {} ships with {} shots.",
            player.id, player.sunk_count, player.shots_fired
        );
    }
    match summary.outcome {
        Some(MatchOutcome::Draw) => println!("The match ended in a draw!"),
        Some(outcome) => {
            if let Some(winner) = outcome.winner() {
                println!("{} won the match!", winner);
            }
        }
        None => println!("The match ended without a result."),
    }
}

mod board;
mod common;
mod config;
mod fleet;
mod game;
mod logging;
mod output;
mod player;
mod player_cli;
mod player_node;
mod player_random;
pub mod prelude;
pub mod resolver;
mod ship;
mod turn;

pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use logging::{init_logging, init_logging_with_default};
pub use output::*;
pub use player::*;
pub use player_cli::*;
pub use player_node::*;
pub use player_random::*;
pub use resolver::AttackOutcome;
pub use ship::*;
pub use turn::*;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::{Coord, InputError, PlayerId};
use crate::player::InputProvider;

/// Fires at every cell of the board exactly once, in random order.
///
/// Used by the simulator; it does not look at results.
pub struct RandomInput {
    rng: SmallRng,
    unfired: Vec<Coord>,
}

impl RandomInput {
    pub fn new(rng: SmallRng, board_size: usize) -> Self {
        let unfired = (0..board_size)
            .flat_map(|r| (0..board_size).map(move |c| Coord::new(r, c)))
            .collect();
        Self { rng, unfired }
    }
}

impl InputProvider for RandomInput {
    fn next_coordinate(&mut self, _player: PlayerId) -> Result<Coord, InputError> {
        if self.unfired.is_empty() {
            return Err(InputError::Closed);
        }
        let i = self.rng.random_range(0..self.unfired.len());
        Ok(self.unfired.swap_remove(i))
    }
}

/// Index of a rating period in a player's history. `Round(0)` is the state
/// the player was created with.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Default)]
pub struct Round(pub usize);

impl From<Round> for usize {
    #[inline]
    fn from(Round(round): Round) -> usize {
        round
    }
}

impl From<usize> for Round {
    #[inline]
    fn from(value: usize) -> Round {
        Round(value)
    }
}

impl Round {
    #[must_use]
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }
}

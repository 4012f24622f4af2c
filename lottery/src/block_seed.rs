use crate::*;
use common::utils::{random_u256, uniform_below};

pub(crate) struct BlockSeedEntropy;

impl IEntropySource for BlockSeedEntropy {
    fn random_below(&self, upper: u64) -> u64 {
        uniform_below(random_u256(), upper)
    }
}

impl Contract {
    pub(crate) fn get_entropy_source(&self) -> Box<dyn IEntropySource> {
        match self.randomness {
            RandomnessSource::BlockSeed => Box::new(BlockSeedEntropy),
        }
    }
}

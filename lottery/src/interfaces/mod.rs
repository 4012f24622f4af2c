pub mod lottery {
    use common::types::RoundId;
    use near_sdk::Promise;

    pub trait LotteryLifecycle{
        fn start_round(&mut self) -> RoundId;
        fn close_round(&mut self, round_id: RoundId);
        fn delete_round(&mut self, round_id: RoundId);
    }

    pub trait TicketBooth{
        /// Reserves `count` tickets for the caller, then charges them on the ledger.
        fn buy_ticket(&mut self, round_id: RoundId, count: u32) -> Promise;
    }

    pub trait PayoutAuthorizer{
        fn claim(&mut self, round_id: RoundId) -> Promise;
    }
}

pub mod entropy {
    use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

    #[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
    pub enum RandomnessSource{
        /// Block random seed. Predictable to block producers.
        BlockSeed,
    }

    pub trait IEntropySource{
        /// Uniform integer in `[0, upper)`. `upper` is never zero.
        fn random_below(&self, upper: u64) -> u64;
    }
}

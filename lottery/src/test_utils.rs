#[cfg(test)]
pub mod tests {
    use near_sdk::test_utils::{get_logs, VMContextBuilder};
    use near_sdk::{testing_env, VMContext};

    use crate::*;
    use crate::tickets::Reservation;

    pub const HOUR_MS: Timestamp = 60 * 60 * 1_000;

    pub fn owner() -> AccountId {
        "owner".parse().unwrap()
    }

    pub fn ledger() -> AccountId {
        "ledger".parse().unwrap()
    }

    pub fn lottery() -> AccountId {
        "lottery".parse().unwrap()
    }

    pub fn alice() -> AccountId {
        "alice".parse().unwrap()
    }

    pub fn bob() -> AccountId {
        "bob".parse().unwrap()
    }

    pub fn charlie() -> AccountId {
        "charlie".parse().unwrap()
    }

    pub fn dave() -> AccountId {
        "dave".parse().unwrap()
    }

    pub fn logs_contain(fragment: &str) -> bool {
        get_logs().iter().any(|line| line.contains(fragment))
    }

    /// Entropy that always answers `value mod upper`.
    pub struct FixedEntropy(pub u64);

    impl IEntropySource for FixedEntropy {
        fn random_below(&self, upper: u64) -> u64 {
            self.0 % upper
        }
    }

    pub struct Emulator {
        pub contract: Contract,
        /// Block time in milliseconds.
        pub now: Timestamp,
        pub predecessor: AccountId,
        pub random_seed: [u8; 32],
        pub context: VMContext,
    }

    impl Emulator {
        pub fn new() -> Self {
            let context = VMContextBuilder::new()
                .current_account_id(lottery())
                .predecessor_account_id(owner())
                .build();
            testing_env!(context.clone());
            let contract = Contract::new(owner(), ledger());
            Emulator {
                contract,
                now: 0,
                predecessor: owner(),
                random_seed: [0; 32],
                context,
            }
        }

        pub fn initialized(ticket_price: Balance, round_duration: Timestamp) -> Self {
            let mut emulator = Self::new();
            emulator
                .contract
                .configure(&owner(), ticket_price, round_duration, PoolScope::Global)
                .unwrap();
            emulator
        }

        pub fn update_context(&mut self) {
            self.context = VMContextBuilder::new()
                .current_account_id(lottery())
                .predecessor_account_id(self.predecessor.clone())
                .block_timestamp(self.now * 1_000_000)
                .random_seed(self.random_seed)
                .build();
            testing_env!(self.context.clone());
        }

        pub fn as_caller(&mut self, account_id: AccountId) {
            self.predecessor = account_id;
            self.update_context();
        }

        /// Calls made next look like callbacks of the contract itself.
        pub fn as_callback(&mut self) {
            self.as_caller(lottery());
        }

        pub fn skip_ms(&mut self, ms: Timestamp) {
            self.now += ms;
            self.update_context();
        }

        pub fn set_random_seed(&mut self, random_seed: [u8; 32]) {
            self.random_seed = random_seed;
            self.update_context();
        }

        pub fn reserve(&mut self, buyer: &AccountId, round_id: RoundId, count: u32) -> Result<Reservation, LotteryError> {
            self.contract.reserve_tickets(buyer, round_id, count, self.now)
        }
    }
}

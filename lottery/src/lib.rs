use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{env, log, near_bindgen, ext_contract, AccountId, Balance, PanicOnDefault, Promise, PromiseError};
use common::ratio::Ratio;
use common::types::{Position, RoundId, TicketNumber, Timestamp};
use errors::{LotteryError, OrPanic};
use interfaces::entropy::{IEntropySource, RandomnessSource};
use lifecycle::{LotteryPhase, Round, RoundStatus, RoundView};
use participants::{Participation, PlayerIndex};
use pool::{PoolScope, PrizePool};
use tickets::TicketRange;
use utils::{gas, storage_keys::StorageKeys};

pub mod external;
pub use crate::external::*;

pub mod errors;
pub mod events;
pub mod interfaces;
pub mod lifecycle;
pub mod participants;
pub mod pool;
pub mod tickets;
mod block_seed;
mod ledger;
mod payout;
mod utils;
#[cfg(test)]
mod test_utils;

/// Settings fixed by [`Contract::initialize`].
#[derive(BorshDeserialize, BorshSerialize, Clone, Debug)]
pub struct LotteryConfig {
    pub ticket_price: Balance,
    /// Milliseconds a round stays open for purchases.
    pub round_duration: Timestamp,
}

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract {
    owner_id: AccountId,
    // ledger that moves ticket payments and prizes
    ledger_id: AccountId,
    config: Option<LotteryConfig>,
    phase: LotteryPhase,
    current_round_id: Option<RoundId>,
    rounds: LookupMap<RoundId, Round>,
    players: PlayerIndex,
    prize_pool: PrizePool,
    randomness: RandomnessSource,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "near_sdk::serde")]
pub struct ConfigurationView {
    pub current_round_id: Option<RoundId>,
    pub phase: LotteryPhase,
    pub ticket_price: Option<U128>,
    pub round_duration: Option<Timestamp>,
    pub prize_pool: U128,
    pub pool_scope: PoolScope,
    pub winner_share: Ratio,
    pub ledger_id: AccountId,
}

#[near_bindgen]
impl Contract {
    /// Deploys the lottery against `ledger_id`. Ticket price and duration are
    /// set later through [`Contract::initialize`].
    #[init]
    pub fn new(owner_id: AccountId, ledger_id: AccountId) -> Self {
        assert!(!env::state_exists(), "Already initialized");

        Self {
            owner_id,
            ledger_id,
            config: None,
            phase: LotteryPhase::Uninitialized,
            current_round_id: None,
            rounds: LookupMap::new(StorageKeys::Rounds),
            players: PlayerIndex::default(),
            prize_pool: PrizePool::new(PoolScope::default()),
            randomness: RandomnessSource::BlockSeed,
        }
    }

    /// Fixes ticket price and round duration (ms). Can only happen once.
    pub fn initialize(&mut self, ticket_price: U128, round_duration: Timestamp, pool_scope: Option<PoolScope>) {
        self.configure(&env::predecessor_account_id(), ticket_price.0, round_duration, pool_scope.unwrap_or_default())
            .or_panic();
    }

    pub fn get_round(&self, round_id: RoundId) -> RoundView {
        self.round(round_id).or_panic().view()
    }

    pub fn get_configuration(&self) -> ConfigurationView {
        ConfigurationView {
            current_round_id: self.current_round_id,
            phase: self.phase,
            ticket_price: self.config.as_ref().map(|config| U128(config.ticket_price)),
            round_duration: self.config.as_ref().map(|config| config.round_duration),
            prize_pool: U128(self.prize_pool.balance()),
            pool_scope: self.prize_pool.scope(),
            winner_share: self.prize_pool.winner_share(),
            ledger_id: self.ledger_id.clone(),
        }
    }

    pub fn get_prize_pool(&self) -> U128 {
        U128(self.prize_pool.balance())
    }

    pub fn get_participation(&self, account_id: AccountId, round_id: RoundId) -> Option<Participation> {
        let round = self.rounds.get(&round_id)?;
        self.participation_of(&round, &account_id).ok()
    }

    /// Rounds the account has entered, oldest first. Deleted rounds are included.
    pub fn get_player_rounds(&self, account_id: AccountId) -> Vec<RoundId> {
        self.players.rounds_of(&account_id)
    }
}

impl Contract {
    pub(crate) fn configure(
        &mut self,
        caller: &AccountId,
        ticket_price: Balance,
        round_duration: Timestamp,
        pool_scope: PoolScope,
    ) -> Result<(), LotteryError> {
        self.assert_owner(caller, "initialize the lottery")?;
        if self.config.is_some() {
            return Err(LotteryError::AlreadyInitialized);
        }

        self.config = Some(LotteryConfig { ticket_price, round_duration });
        self.prize_pool = PrizePool::new(pool_scope);
        self.phase = LotteryPhase::Idle;
        log!("Lottery initialized, ticket price {} round duration {}ms", ticket_price, round_duration);

        Ok(())
    }
}

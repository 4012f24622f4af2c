use common::types::{RoundId, Timestamp};
use lottery::interfaces::lottery::{LotteryLifecycle, TicketBooth};
use lottery::lifecycle::RoundView;
use lottery::tickets::TicketRange;
use lottery::Contract;
use near_sdk::json_types::U128;
use near_sdk::test_utils::{get_logs, VMContextBuilder};
use near_sdk::{testing_env, AccountId, Balance};

pub const HOUR_MS: Timestamp = 60 * 60 * 1_000;
pub const TICKET_PRICE: Balance = 10;

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

pub fn event_logged(event: &str) -> bool {
    let needle = format!("\"event\":\"{}\"", event);
    get_logs()
        .iter()
        .any(|line| line.starts_with("EVENT_JSON:") && line.contains(&needle))
}

/// Drives the contract through its public methods, one receipt at a time.
pub struct Harness {
    pub contract: Contract,
    pub now: Timestamp,
    pub random_seed: [u8; 32],
}

impl Harness {
    pub fn deploy() -> Self {
        set_context(owner(), 0, [0; 32]);
        Harness {
            contract: Contract::new(owner(), ledger()),
            now: 0,
            random_seed: [0; 32],
        }
    }

    pub fn initialized() -> Self {
        let mut harness = Self::deploy();
        harness.contract.initialize(U128(TICKET_PRICE), HOUR_MS, None);
        harness
    }

    pub fn call_as(&mut self, caller: AccountId) {
        set_context(caller, self.now, self.random_seed);
    }

    pub fn skip_ms(&mut self, ms: Timestamp) {
        self.now += ms;
    }

    /// The draw of the block seed entropy is `seed mod tickets_sold`.
    pub fn seed_draw(&mut self, value: u8) {
        self.random_seed = [0; 32];
        self.random_seed[0] = value;
    }

    /// Full purchase: the reservation call and the ledger's answer to it.
    pub fn buy(&mut self, buyer: AccountId, round_id: RoundId, count: u32, paid: bool) -> bool {
        self.call_as(buyer.clone());
        self.contract.buy_ticket(round_id, count);

        let round = self.round(round_id);
        let first = round.tickets_sold - count;
        self.call_as(lottery());
        self.contract.on_ticket_payment(
            buyer,
            round_id,
            TicketRange { first, count },
            U128(TICKET_PRICE * Balance::from(count)),
            Ok(paid),
        )
    }

    pub fn close(&mut self, round_id: RoundId) {
        self.call_as(owner());
        self.contract.close_round(round_id);
    }

    pub fn round(&self, round_id: RoundId) -> RoundView {
        self.contract.get_round(round_id)
    }
}

fn set_context(caller: AccountId, now: Timestamp, random_seed: [u8; 32]) {
    let context = VMContextBuilder::new()
        .current_account_id(lottery())
        .predecessor_account_id(caller)
        .block_timestamp(now * 1_000_000)
        .random_seed(random_seed)
        .build();
    testing_env!(context);
}

use std::fmt;

use crate::*;
use crate::interfaces::lottery::LotteryLifecycle;
use crate::payout::draw_winning_ticket;
use near_sdk::collections::Vector;

/// Phase of the lottery as a whole. It only ever follows the most recently
/// started round; older rounds are gated by their own [`RoundStatus`].
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub enum LotteryPhase {
    Uninitialized,
    /// No round is selling tickets, a new one may start.
    Idle,
    /// The current round accepts purchases.
    Active,
}

impl fmt::Display for LotteryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotteryPhase::Uninitialized => write!(f, "lottery is uninitialized"),
            LotteryPhase::Idle => write!(f, "no round is active"),
            LotteryPhase::Active => write!(f, "a round is active"),
        }
    }
}

/// Completion marker of a single round. Only moves forward.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub enum RoundStatus {
    Open,
    AwaitingPayout,
    Completed,
}

impl RoundStatus {
    pub fn marker(&self) -> u8 {
        match self {
            RoundStatus::Open => 0,
            RoundStatus::AwaitingPayout => 1,
            RoundStatus::Completed => 2,
        }
    }
}

#[derive(BorshDeserialize, BorshSerialize)]
pub struct Round {
    pub id: RoundId,
    pub opened_at: Timestamp,
    pub closes_at: Timestamp,
    pub tickets_sold: TicketNumber,
    /// Tickets whose payment the ledger confirmed.
    pub tickets_paid: TicketNumber,
    pub winning_ticket: Option<TicketNumber>,
    pub winner: Option<AccountId>,
    /// Value accrued by this round's sales.
    pub collected: Balance,
    pub paid_out: Balance,
    pub status: RoundStatus,
    /// Held by the claimant while its payout is in flight.
    pub claim_lock: Option<AccountId>,
    pub participations: Vector<Participation>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "near_sdk::serde")]
pub struct RoundView {
    pub id: RoundId,
    pub opened_at: Timestamp,
    pub closes_at: Timestamp,
    pub tickets_sold: TicketNumber,
    pub tickets_paid: TicketNumber,
    pub winning_ticket: Option<TicketNumber>,
    pub winner: Option<AccountId>,
    pub collected: U128,
    pub paid_out: U128,
    pub status: RoundStatus,
    pub participations: Vec<Participation>,
}

impl Round {
    pub fn new(id: RoundId, opened_at: Timestamp, duration: Timestamp) -> Self {
        Self {
            id,
            opened_at,
            closes_at: opened_at.saturating_add(duration),
            tickets_sold: 0,
            tickets_paid: 0,
            winning_ticket: None,
            winner: None,
            collected: 0,
            paid_out: 0,
            status: RoundStatus::Open,
            claim_lock: None,
            participations: Vector::new(StorageKeys::RoundParticipations { round_id: id }),
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.closes_at
    }

    /// Moves the status forward, refusing to stay put or go back.
    pub(crate) fn advance(&mut self, next: RoundStatus, operation: &'static str) -> Result<(), LotteryError> {
        if next.marker() <= self.status.marker() {
            return Err(self.invalid_status(operation));
        }
        self.status = next;

        Ok(())
    }

    pub(crate) fn invalid_status(&self, operation: &'static str) -> LotteryError {
        LotteryError::InvalidPhase {
            operation,
            state: format!("round {} is {:?}", self.id, self.status),
        }
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            id: self.id,
            opened_at: self.opened_at,
            closes_at: self.closes_at,
            tickets_sold: self.tickets_sold,
            tickets_paid: self.tickets_paid,
            winning_ticket: self.winning_ticket,
            winner: self.winner.clone(),
            collected: U128(self.collected),
            paid_out: U128(self.paid_out),
            status: self.status,
            participations: self.participations.to_vec(),
        }
    }
}

impl Contract {
    pub(crate) fn config(&self) -> Result<&LotteryConfig, LotteryError> {
        self.config.as_ref().ok_or(LotteryError::Uninitialized)
    }

    pub(crate) fn ensure_phase(&self, expected: LotteryPhase, operation: &'static str) -> Result<(), LotteryError> {
        if self.phase != expected {
            return Err(LotteryError::InvalidPhase { operation, state: self.phase.to_string() });
        }

        Ok(())
    }

    pub(crate) fn round(&self, round_id: RoundId) -> Result<Round, LotteryError> {
        self.rounds.get(&round_id).ok_or(LotteryError::RoundNotFound(round_id))
    }

    pub(crate) fn open_round(&mut self, now: Timestamp) -> Result<RoundId, LotteryError> {
        let duration = self.config()?.round_duration;
        self.ensure_phase(LotteryPhase::Idle, "start a round")?;

        let round_id = match self.current_round_id {
            Some(id) => id.checked_add(1).ok_or(LotteryError::InvalidPhase {
                operation: "start a round",
                state: "round ids are exhausted".to_string(),
            })?,
            None => 0,
        };

        let round = Round::new(round_id, now, duration);
        events::events::round_started(round_id, round.closes_at);
        self.rounds.insert(&round_id, &round);
        self.current_round_id = Some(round_id);
        self.phase = LotteryPhase::Active;

        Ok(round_id)
    }

    pub(crate) fn finish_round(
        &mut self,
        round_id: RoundId,
        now: Timestamp,
        entropy: &dyn IEntropySource,
    ) -> Result<Option<TicketNumber>, LotteryError> {
        self.config()?;
        self.ensure_phase(LotteryPhase::Active, "close a round")?;
        let mut round = self.round(round_id)?;

        if round.status != RoundStatus::Open {
            return Err(round.invalid_status("close a round"));
        }
        if !round.is_expired(now) {
            return Err(LotteryError::RoundNotYetClosed { round_id, closes_at: round.closes_at });
        }

        round.winning_ticket = draw_winning_ticket(entropy, round.tickets_sold);
        // nobody can claim an empty round
        let next = match round.winning_ticket {
            Some(_) => RoundStatus::AwaitingPayout,
            None => RoundStatus::Completed,
        };
        round.advance(next, "close a round")?;

        self.rounds.insert(&round_id, &round);
        self.phase = LotteryPhase::Idle;
        events::events::round_closed(round_id, round.winning_ticket);

        Ok(round.winning_ticket)
    }

    pub(crate) fn remove_round(&mut self, round_id: RoundId) -> Result<(), LotteryError> {
        let mut round = self.round(round_id)?;
        if round.status != RoundStatus::Completed {
            return Err(round.invalid_status("delete a round"));
        }

        round.participations.clear();
        self.rounds.remove(&round_id);
        events::events::round_deleted(round_id);

        Ok(())
    }
}

#[near_bindgen]
impl LotteryLifecycle for Contract {
    fn start_round(&mut self) -> RoundId {
        self.open_round(env::block_timestamp_ms()).or_panic()
    }

    fn close_round(&mut self, round_id: RoundId) {
        let entropy = self.get_entropy_source();
        self.finish_round(round_id, env::block_timestamp_ms(), entropy.as_ref()).or_panic();
    }

    fn delete_round(&mut self, round_id: RoundId) {
        self.remove_round(round_id).or_panic();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tests::*;

    #[test]
    fn test_start_requires_initialization() {
        let mut emulator = Emulator::new();
        assert_eq!(emulator.contract.open_round(0), Err(LotteryError::Uninitialized));
    }

    #[test]
    fn test_start_opens_round() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.skip_ms(1_000);

        let round_id = emulator.contract.open_round(emulator.now).unwrap();
        assert_eq!(round_id, 0);
        assert_eq!(emulator.contract.get_configuration().phase, LotteryPhase::Active);
        assert_eq!(emulator.contract.get_configuration().current_round_id, Some(0));

        let round = emulator.contract.get_round(0);
        assert_eq!(round.opened_at, 1_000);
        assert_eq!(round.closes_at, 1_000 + HOUR_MS);
        assert_eq!(round.tickets_sold, 0);
        assert_eq!(round.status, RoundStatus::Open);
        assert!(round.participations.is_empty());
    }

    #[test]
    fn test_start_while_active_fails() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.open_round(emulator.now).unwrap();

        assert!(matches!(
            emulator.contract.open_round(emulator.now),
            Err(LotteryError::InvalidPhase { operation: "start a round", .. })
        ));
        assert_eq!(emulator.contract.get_configuration().current_round_id, Some(0));
    }

    #[test]
    fn test_close_before_end_fails() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.open_round(emulator.now).unwrap();
        emulator.skip_ms(HOUR_MS - 1);

        assert_eq!(
            emulator.contract.finish_round(0, emulator.now, &FixedEntropy(0)),
            Err(LotteryError::RoundNotYetClosed { round_id: 0, closes_at: HOUR_MS })
        );
        assert_eq!(emulator.contract.get_round(0).status, RoundStatus::Open);
    }

    #[test]
    fn test_close_draws_and_returns_to_idle() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.open_round(emulator.now).unwrap();
        emulator.reserve(&alice(), 0, 4).unwrap();
        emulator.skip_ms(HOUR_MS);

        let winning = emulator.contract.finish_round(0, emulator.now, &FixedEntropy(6)).unwrap();
        assert_eq!(winning, Some(2));

        let round = emulator.contract.get_round(0);
        assert_eq!(round.winning_ticket, Some(2));
        assert_eq!(round.status, RoundStatus::AwaitingPayout);
        assert_eq!(emulator.contract.get_configuration().phase, LotteryPhase::Idle);

        // a closed round cannot be closed again, even once a new one runs
        emulator.contract.open_round(emulator.now).unwrap();
        assert!(matches!(
            emulator.contract.finish_round(0, emulator.now + HOUR_MS, &FixedEntropy(0)),
            Err(LotteryError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_close_empty_round_completes_it() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.open_round(emulator.now).unwrap();
        emulator.skip_ms(HOUR_MS);

        assert_eq!(emulator.contract.finish_round(0, emulator.now, &FixedEntropy(3)), Ok(None));
        assert_eq!(emulator.contract.get_round(0).status, RoundStatus::Completed);
        assert_eq!(emulator.contract.remove_round(0), Ok(()));
    }

    #[test]
    fn test_round_ids_increase() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);

        for expected in 0..4 {
            let round_id = emulator.contract.open_round(emulator.now).unwrap();
            assert_eq!(round_id, expected);
            emulator.skip_ms(HOUR_MS);
            emulator.contract.finish_round(round_id, emulator.now, &FixedEntropy(0)).unwrap();
            emulator.contract.remove_round(round_id).unwrap();
        }

        // deleted ids are not handed out again
        assert_eq!(emulator.contract.open_round(emulator.now), Ok(4));
    }

    #[test]
    fn test_delete_requires_completed_round() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        assert_eq!(emulator.contract.remove_round(0), Err(LotteryError::RoundNotFound(0)));

        emulator.contract.open_round(emulator.now).unwrap();
        emulator.reserve(&alice(), 0, 1).unwrap();
        assert!(matches!(emulator.contract.remove_round(0), Err(LotteryError::InvalidPhase { .. })));

        emulator.skip_ms(HOUR_MS);
        emulator.contract.finish_round(0, emulator.now, &FixedEntropy(0)).unwrap();
        assert!(matches!(emulator.contract.remove_round(0), Err(LotteryError::InvalidPhase { .. })));
        assert_eq!(emulator.contract.get_round(0).status, RoundStatus::AwaitingPayout);
    }

    #[test]
    fn test_status_never_goes_back() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.open_round(emulator.now).unwrap();
        let mut round = emulator.contract.round(0).unwrap();

        round.advance(RoundStatus::Completed, "test").unwrap();
        assert!(round.advance(RoundStatus::AwaitingPayout, "test").is_err());
        assert!(round.advance(RoundStatus::Completed, "test").is_err());
        assert_eq!(round.status.marker(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot start a round while a round is active")]
    fn test_start_round_panics_when_active() {
        let mut emulator = Emulator::initialized(10, HOUR_MS);
        emulator.contract.start_round();
        emulator.contract.start_round();
    }
}

use crate::*;
use crate::interfaces::lottery::PayoutAuthorizer;

/// A validated claim whose transfer is about to be requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    pub round_id: RoundId,
    pub winner: AccountId,
    pub reward: Balance,
}

/// Uniform pick in `[0, tickets_sold)`, or `None` when nothing was sold.
pub(crate) fn draw_winning_ticket(entropy: &dyn IEntropySource, tickets_sold: TicketNumber) -> Option<TicketNumber> {
    if tickets_sold == 0 {
        return None;
    }

    let drawn = entropy.random_below(u64::from(tickets_sold));
    // `random_below` stays below `tickets_sold`, which fits in a ticket number
    TicketNumber::try_from(drawn).ok()
}

impl Contract {
    /// Checks that `claimant` holds the winning ticket, then debits the reward
    /// and locks the round until the transfer settles.
    pub(crate) fn authorize_claim(&mut self, claimant: &AccountId, round_id: RoundId) -> Result<Payout, LotteryError> {
        self.config()?;
        let mut round = self.round(round_id)?;

        match round.status {
            RoundStatus::Open => return Err(round.invalid_status("claim a prize")),
            RoundStatus::Completed => return Err(LotteryError::AlreadyCompleted(round_id)),
            RoundStatus::AwaitingPayout => {}
        }
        if round.claim_lock.is_some() {
            return Err(LotteryError::PayoutInProgress(round_id));
        }

        let participation = self.participation_of(&round, claimant)?;
        let winning_ticket = round.winning_ticket.ok_or(LotteryError::CorruptedIndex(round_id))?;
        if !participation.tickets.contains(&winning_ticket) {
            return Err(LotteryError::NotWinner(claimant.clone(), round_id));
        }

        let reward = self.prize_pool.withdraw_share(&mut round);
        round.claim_lock = Some(claimant.clone());
        self.rounds.insert(&round_id, &round);

        Ok(Payout { round_id, winner: claimant.clone(), reward })
    }

    pub(crate) fn settle_payout(&mut self, winner: &AccountId, round_id: RoundId, reward: Balance, paid: bool) -> bool {
        let mut round = match self.rounds.get(&round_id) {
            Some(round) => round,
            None => {
                log!("Round {} is gone, payout of {} to {} not recorded", round_id, reward, winner);
                return false;
            }
        };
        round.claim_lock = None;

        if !paid {
            log!("Payout of {} to {} for round {} failed, the pool is not refilled", reward, winner, round_id);
            self.rounds.insert(&round_id, &round);
            events::events::payout_failed(winner, round_id, reward);
            return false;
        }

        round.winner = Some(winner.clone());
        let advanced = round.advance(RoundStatus::Completed, "complete a payout");
        self.rounds.insert(&round_id, &round);

        if let Err(err) = advanced {
            log!("{}", err);
            return false;
        }
        events::events::prize_paid(winner, round_id, reward);

        true
    }
}

#[near_bindgen]
impl PayoutAuthorizer for Contract {
    fn claim(&mut self, round_id: RoundId) -> Promise {
        let claimant = env::predecessor_account_id();
        let payout = self.authorize_claim(&claimant, round_id).or_panic();

        log!("Paying {} to {} for round {}", payout.reward, payout.winner, round_id);
        self.pay_winner(&payout)
    }
}

#[near_bindgen]
impl Contract {
    /// Completes the round once the ledger moved the reward. Releases the
    /// claim lock either way.
    #[private]
    pub fn on_prize_paid(&mut self, winner: AccountId, round_id: RoundId, reward: U128, #[callback_result] call_result: Result<bool, PromiseError>) -> bool {
        let paid = matches!(call_result, Ok(true));
        if let Err(err) = call_result {
            log!("{:?}", err);
        }

        self.settle_payout(&winner, round_id, reward.0, paid)
    }
}

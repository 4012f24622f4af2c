use crate::*;
use crate::interfaces::lottery::TicketBooth;

/// Contiguous run of ticket numbers handed out by one purchase.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct TicketRange {
    pub first: TicketNumber,
    pub count: u32,
}

impl TicketRange {
    pub fn end(&self) -> TicketNumber {
        self.first + self.count
    }

    pub fn numbers(&self) -> Vec<TicketNumber> {
        (self.first..self.end()).collect()
    }
}

/// Tickets and index slot taken by a purchase before it is paid for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub round_id: RoundId,
    pub buyer: AccountId,
    pub tickets: TicketRange,
    pub position: Position,
    pub amount: Balance,
}

/// Hands out `[tickets_sold, tickets_sold + count)` and moves the counter past it.
pub(crate) fn allocate_tickets(round: &mut Round, count: u32) -> Result<TicketRange, LotteryError> {
    if count == 0 {
        return Err(LotteryError::InvalidTicketCount);
    }

    let first = round.tickets_sold;
    round.tickets_sold = first
        .checked_add(count)
        .ok_or(LotteryError::TicketLimitReached(round.id))?;

    Ok(TicketRange { first, count })
}

impl Contract {
    /// Validates a purchase and commits its tickets, index entries and pool
    /// accrual. Nothing is written when an error is returned.
    pub(crate) fn reserve_tickets(
        &mut self,
        buyer: &AccountId,
        round_id: RoundId,
        count: u32,
        now: Timestamp,
    ) -> Result<Reservation, LotteryError> {
        if count == 0 {
            return Err(LotteryError::InvalidTicketCount);
        }
        let ticket_price = self.config()?.ticket_price;
        self.ensure_phase(LotteryPhase::Active, "buy tickets")?;

        let mut round = self.round(round_id)?;
        if round.status != RoundStatus::Open {
            return Err(round.invalid_status("buy tickets"));
        }
        if round.is_expired(now) {
            return Err(LotteryError::RoundExpired(round_id));
        }

        let amount = ticket_price
            .checked_mul(Balance::from(count))
            .ok_or(LotteryError::TicketLimitReached(round_id))?;
        let tickets = allocate_tickets(&mut round, count)?;
        let position = self.record_tickets(&mut round, buyer, &tickets)?;
        self.prize_pool.accrue(&mut round, amount);
        self.rounds.insert(&round_id, &round);

        Ok(Reservation { round_id, buyer: buyer.clone(), tickets, position, amount })
    }

    pub(crate) fn settle_ticket_payment(&mut self, buyer: &AccountId, round_id: RoundId, tickets: &TicketRange, amount: Balance, paid: bool) -> bool {
        if !paid {
            let err = LotteryError::PaymentFailure { payer: buyer.clone(), amount };
            log!("Round {}: {} for tickets {}..{}", round_id, err, tickets.first, tickets.end());
            events::events::ticket_payment_failed(buyer, round_id, tickets, amount);
            return false;
        }

        match self.rounds.get(&round_id) {
            Some(mut round) => {
                round.tickets_paid += tickets.count;
                self.rounds.insert(&round_id, &round);
            }
            None => log!("Round {} was removed before its payment settled", round_id),
        }
        events::events::tickets_purchased(buyer, round_id, tickets, amount);

        true
    }
}

#[near_bindgen]
impl TicketBooth for Contract {
    fn buy_ticket(&mut self, round_id: RoundId, count: u32) -> Promise {
        let buyer = env::predecessor_account_id();
        let reservation = self
            .reserve_tickets(&buyer, round_id, count, env::block_timestamp_ms())
            .or_panic();

        events::events::tickets_reserved(&buyer, round_id, &reservation.tickets, reservation.amount);
        self.charge_player(&reservation)
    }
}

#[near_bindgen]
impl Contract {
    /// Last step of a purchase. A failed payment does not release the
    /// reserved tickets; `tickets_sold - tickets_paid` shows them.
    #[private]
    pub fn on_ticket_payment(&mut self, buyer: AccountId, round_id: RoundId, tickets: TicketRange, amount: U128, #[callback_result] call_result: Result<bool, PromiseError>) -> bool {
        let paid = matches!(call_result, Ok(true));
        if let Err(err) = call_result {
            log!("{:?}", err);
        }

        self.settle_ticket_payment(&buyer, round_id, &tickets, amount.0, paid)
    }
}

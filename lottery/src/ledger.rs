use crate::*;
use crate::payout::Payout;
use crate::tickets::Reservation;
use crate::utils::utils::payout_address;

/// Tokens handed to an account that holds none.
pub const FAUCET_AMOUNT: Balance = 100;

impl Contract {
    /// Moves the reserved amount from the buyer to the lottery, then settles
    /// the reservation in [`Contract::on_ticket_payment`].
    pub(crate) fn charge_player(&self, reservation: &Reservation) -> Promise {
        ext_ledger::transfer(
            reservation.buyer.clone(),
            env::current_account_id(),
            U128(reservation.amount),
            self.ledger_id.clone(),
            0,
            gas::LEDGER_TRANSFER,
        )
        .then(this_contract::on_ticket_payment(
            reservation.buyer.clone(),
            reservation.round_id,
            reservation.tickets,
            U128(reservation.amount),
            env::current_account_id(),
            0,
            gas::ON_TICKET_PAYMENT,
        ))
    }

    pub(crate) fn pay_winner(&self, payout: &Payout) -> Promise {
        ext_ledger::transfer(
            env::current_account_id(),
            payout_address(&payout.winner),
            U128(payout.reward),
            self.ledger_id.clone(),
            0,
            gas::LEDGER_TRANSFER,
        )
        .then(this_contract::on_prize_paid(
            payout.winner.clone(),
            payout.round_id,
            U128(payout.reward),
            env::current_account_id(),
            0,
            gas::ON_PRIZE_PAID,
        ))
    }

    pub(crate) fn faucet_decision(&self, balance: Result<U128, PromiseError>) -> Result<Balance, LotteryError> {
        match balance {
            Ok(balance) if balance.0 > 0 => Err(LotteryError::FaucetRefused),
            Ok(_) => Ok(FAUCET_AMOUNT),
            Err(_) => Err(LotteryError::LedgerUnavailable),
        }
    }
}

#[near_bindgen]
impl Contract {
    /// Ledger balance of `account_id`, or of the caller when omitted.
    pub fn wallet_balance(&mut self, account_id: Option<AccountId>) -> Promise {
        let account_id = account_id.unwrap_or_else(env::predecessor_account_id);

        ext_ledger::balance_of(account_id, self.ledger_id.clone(), 0, gas::LEDGER_BALANCE)
    }

    /// Sends [`FAUCET_AMOUNT`] from the lottery to a caller with an empty balance.
    pub fn request_faucet_tokens(&mut self) -> Promise {
        let account_id = env::predecessor_account_id();

        ext_ledger::balance_of(account_id.clone(), self.ledger_id.clone(), 0, gas::LEDGER_BALANCE)
            .then(this_contract::on_faucet_balance(account_id, env::current_account_id(), 0, gas::ON_FAUCET_BALANCE))
    }

    #[private]
    pub fn on_faucet_balance(&mut self, account_id: AccountId, #[callback_result] call_result: Result<U128, PromiseError>) -> Promise {
        let amount = self.faucet_decision(call_result).or_panic();
        log!("Faucet sends {} to {}", amount, account_id);

        ext_ledger::transfer(
            env::current_account_id(),
            account_id,
            U128(amount),
            self.ledger_id.clone(),
            0,
            gas::LEDGER_TRANSFER,
        )
    }
}

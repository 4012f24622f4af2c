use crate::*;

// Callback
#[ext_contract(this_contract)]
pub trait ExtSelf {
    fn on_ticket_payment(&mut self, buyer: AccountId, round_id: RoundId, tickets: TicketRange, amount: U128, #[callback_result] call_result: Result<bool, PromiseError>) -> bool;
    fn on_prize_paid(&mut self, winner: AccountId, round_id: RoundId, reward: U128, #[callback_result] call_result: Result<bool, PromiseError>) -> bool;
    fn on_faucet_balance(&mut self, account_id: AccountId, #[callback_result] call_result: Result<U128, PromiseError>) -> Promise;
}

#[ext_contract(ext_ledger)]
pub trait Ledger {
    /// Moves `amount` from `from` to `to`. Returns `false` when the ledger refuses,
    /// e.g. because `from` cannot cover the amount.
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: U128) -> bool;

    /// Returns the balance of the account. If the account doesn't exist, `"0"` must be returned.
    fn balance_of(&self, account_id: AccountId) -> U128;
}

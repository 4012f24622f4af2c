use common::types::{RoundId, Timestamp};
use near_sdk::{env, AccountId, Balance};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotteryError {
    #[error("lottery is not initialized")]
    Uninitialized,

    #[error("lottery is already initialized")]
    AlreadyInitialized,

    #[error("only the owner can {0}")]
    Unauthorized(&'static str),

    #[error("cannot {operation} while {state}")]
    InvalidPhase { operation: &'static str, state: String },

    #[error("round {0} not found")]
    RoundNotFound(RoundId),

    #[error("round {0} is over, tickets can no longer be bought")]
    RoundExpired(RoundId),

    #[error("round {round_id} stays open until {closes_at}")]
    RoundNotYetClosed { round_id: RoundId, closes_at: Timestamp },

    #[error("at least one ticket must be bought")]
    InvalidTicketCount,

    #[error("round {0} cannot sell that many tickets")]
    TicketLimitReached(RoundId),

    /// The ledger refused the transfer. Anything reserved before the call stays reserved.
    #[error("payment of {amount} from {payer} failed, reserved state is kept")]
    PaymentFailure { payer: AccountId, amount: Balance },

    #[error("{0} did not participate in round {1}")]
    NotAParticipant(AccountId, RoundId),

    #[error("{0} does not hold the winning ticket of round {1}")]
    NotWinner(AccountId, RoundId),

    #[error("prize of round {0} was already paid out")]
    AlreadyCompleted(RoundId),

    #[error("payout of round {0} is already in flight")]
    PayoutInProgress(RoundId),

    #[error("participation index of round {0} is inconsistent")]
    CorruptedIndex(RoundId),

    #[error("ledger did not answer")]
    LedgerUnavailable,

    #[error("to prevent faucet drain, please utilize your existing tokens")]
    FaucetRefused,
}

pub(crate) trait OrPanic<T> {
    fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T, LotteryError> {
    fn or_panic(self) -> T {
        self.unwrap_or_else(|err| env::panic_str(&err.to_string()))
    }
}

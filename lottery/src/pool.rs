use crate::*;

const WINNER_SHARE: Ratio = Ratio::new(1, 2);

/// Which sales a winner's share is computed from.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub enum PoolScope {
    /// One pool across every round; a winner takes a share of all of it.
    Global,
    /// A winner takes a share of its own round's sales only.
    PerRound,
}

impl Default for PoolScope {
    fn default() -> Self {
        PoolScope::Global
    }
}

#[derive(BorshDeserialize, BorshSerialize)]
pub struct PrizePool {
    scope: PoolScope,
    balance: Balance,
    winner_share: Ratio,
}

impl PrizePool {
    pub fn new(scope: PoolScope) -> Self {
        WINNER_SHARE.assert_valid();

        Self { scope, balance: 0, winner_share: WINNER_SHARE }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn scope(&self) -> PoolScope {
        self.scope
    }

    pub fn winner_share(&self) -> Ratio {
        self.winner_share
    }

    /// Books a sale of `round` into the pool.
    pub(crate) fn accrue(&mut self, round: &mut Round, amount: Balance) {
        round.collected += amount;
        self.balance += amount;
    }

    pub fn reward_for(&self, round: &Round) -> Balance {
        let base = match self.scope {
            PoolScope::Global => self.balance,
            PoolScope::PerRound => round.collected.saturating_sub(round.paid_out).min(self.balance),
        };

        self.winner_share.multiply(base)
    }

    /// Debits the winner's share of `round` and returns it.
    pub(crate) fn withdraw_share(&mut self, round: &mut Round) -> Balance {
        let reward = self.reward_for(round);
        self.balance -= reward;
        round.paid_out += reward;

        reward
    }
}

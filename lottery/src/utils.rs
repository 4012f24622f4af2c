use crate::Contract;
use crate::errors::LotteryError;
use near_sdk::AccountId;

pub mod storage_keys{
    use common::types::RoundId;
    use near_sdk::{BorshStorageKey, CryptoHash};
    use near_sdk::borsh::{self, BorshSerialize};

    #[derive(BorshStorageKey, BorshSerialize)]
    pub enum StorageKeys {
        Rounds,
        RoundParticipations {round_id: RoundId},
        CallerHandles,
        CallerHandleList {account_hash: CryptoHash},
        HandlePositions,
    }
}

pub mod utils{
    use common::types::RoundId;
    use near_sdk::{AccountId, CryptoHash};
    use near_sdk::env;

    pub(crate) fn get_hash(account_id: &AccountId) -> CryptoHash {
        env::sha256_array(account_id.as_bytes())
    }

    /// Opaque part of a participation handle. The nonce keeps tokens minted
    /// within one block apart.
    pub(crate) fn mint_handle_token(account_id: &AccountId, round_id: RoundId, nonce: u64) -> String{
        let seed = env::random_seed();
        let parts: [&[u8]; 4] = [
            account_id.as_bytes(),
            &round_id.to_le_bytes(),
            &nonce.to_le_bytes(),
            &seed,
        ];

        return env::sha256_array(&parts.concat())
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect();
    }

    /// Ledger account that receives the winnings of `account_id`.
    pub(crate) fn payout_address(account_id: &AccountId) -> AccountId{
        account_id.clone()
    }
}

impl Contract{
    pub(crate) fn assert_owner(&self, caller: &AccountId, action: &'static str) -> Result<(), LotteryError>{
        if *caller != self.owner_id {
            return Err(LotteryError::Unauthorized(action));
        }

        Ok(())
    }
}

pub mod gas{
    use near_sdk::Gas;

    pub const LEDGER_TRANSFER: Gas = Gas(Gas::ONE_TERA.0 * 10);
    pub const LEDGER_BALANCE: Gas = Gas(5_000_000_000_000);
    pub const ON_TICKET_PAYMENT: Gas = Gas(15_000_000_000_000);
    pub const ON_PRIZE_PAID: Gas = Gas(15_000_000_000_000);
    pub const ON_FAUCET_BALANCE: Gas = Gas(Gas::ONE_TERA.0 * 20);
}

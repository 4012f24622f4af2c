pub mod types;

pub mod ratio{
    use borsh::{BorshDeserialize, BorshSerialize};
    use serde::{Deserialize, Serialize};

    use crate::types::U256;

    /// Share of a balance, `numerator / denominator`.
    #[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Ratio {
        pub numerator: u128,
        pub denominator: u128,
    }

    impl Ratio {
        pub const fn new(numerator: u128, denominator: u128) -> Self {
            Self { numerator, denominator }
        }

        pub fn assert_valid(&self) {
            assert!(self.denominator != 0 || self.numerator == self.denominator, "Denominator can be 0, only if numerator is 0");
            assert!(
                self.numerator <= self.denominator,
                "The share must be less or equal to 1"
            );
        }

        pub fn multiply(&self, value: u128) -> u128 {
            self.assert_valid();
            if self.denominator == 0 || self.numerator == 0 {
                0
            } else {
                (U256::from(self.numerator) * U256::from(value) / U256::from(self.denominator))
                    .as_u128()
            }
        }
    }
}

pub mod utils{
    use near_sdk::env;

    use crate::types::U256;

    pub fn as_u256(arr: &[u8; 32]) -> U256{
        let mut result:U256 = U256::zero();
        let mut shift:u16 = 0;

        for idx in 0..arr.len(){
            result += U256::from(arr[idx]) << shift;
            shift += 8;
        }

        return result;
    }

    /// Reads the block random seed as a little endian 256-bit number.
    ///
    /// Block producers can see and influence this seed, so it must not guard
    /// prizes worth more than that influence costs.
    pub fn random_u256() -> U256{
        let random_seed = env::random_seed(); // len 32
        let mut bytes = [0u8; 32];
        let len = random_seed.len().min(bytes.len());
        bytes[..len].copy_from_slice(&random_seed[..len]);

        return as_u256(&bytes);
    }

    /// Maps `value` onto `[0, upper)`. `upper` of zero is treated as one.
    pub fn uniform_below(value: U256, upper: u64) -> u64{
        return (value % U256::from(upper.max(1))).low_u64();
    }
}

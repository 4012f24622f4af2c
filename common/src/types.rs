use uint::construct_uint;

pub type RoundId = u32;
pub type TicketNumber = u32;
/// Offset of a participation inside its round's participation sequence.
pub type Position = u32;
/// Block time in milliseconds.
pub type Timestamp = u64;

construct_uint!{
    /// 256-bit unsigned integer
    pub struct U256(4);
}

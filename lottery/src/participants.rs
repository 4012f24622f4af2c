use near_sdk::collections::{LookupMap, Vector};
use crate::*;

/// A caller's tickets within one round.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct Participation{
    /// Offset inside the round's participation sequence, fixed at creation.
    pub position: Position,
    pub player: AccountId,
    pub tickets: Vec<TicketNumber>,
}

/// Links one caller to its participation in one round. Minted the first time
/// the caller buys into that round and never reused.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct ParticipationHandle{
    pub round_id: RoundId,
    pub token: String,
}

#[derive(BorshDeserialize, BorshSerialize)]
pub struct CallerHandles{
    handles: Vector<ParticipationHandle>,
}

impl CallerHandles{
    fn find(&self, round_id: RoundId) -> Option<ParticipationHandle>{
        self.handles.iter().find(|handle| handle.round_id == round_id)
    }
}

/// Caller index (caller -> handles, append only) plus position index
/// (handle -> position in the round's participations).
#[derive(BorshDeserialize, BorshSerialize)]
pub struct PlayerIndex{
    callers: LookupMap<AccountId, CallerHandles>,
    positions: LookupMap<ParticipationHandle, Position>,
    minted: u64,
}

impl Default for PlayerIndex{
    fn default() -> Self {
        PlayerIndex {
            callers: LookupMap::new(StorageKeys::CallerHandles),
            positions: LookupMap::new(StorageKeys::HandlePositions),
            minted: 0,
        }
    }
}

impl PlayerIndex{
    fn get_handles(&self, account_id: &AccountId) -> CallerHandles{
        return self.callers.get(account_id).unwrap_or_else(|| {
            CallerHandles {
                handles: Vector::new(
                    StorageKeys::CallerHandleList {
                        account_hash: utils::utils::get_hash(account_id)
                    }
                )
            }
        });
    }

    pub fn find_handle(&self, account_id: &AccountId, round_id: RoundId) -> Option<ParticipationHandle>{
        self.get_handles(account_id).find(round_id)
    }

    pub fn position_of(&self, account_id: &AccountId, round_id: RoundId) -> Option<Position>{
        let handle = self.find_handle(account_id, round_id)?;
        self.positions.get(&handle)
    }

    /// Mints the handle of `account_id` for `round_id` and points it at `position`.
    pub fn enroll(&mut self, account_id: &AccountId, round_id: RoundId, position: Position) -> ParticipationHandle{
        let mut caller_handles = self.get_handles(account_id);
        assert!(caller_handles.find(round_id).is_none(), "Handle already minted for this round");

        let handle = ParticipationHandle {
            round_id,
            token: utils::utils::mint_handle_token(account_id, round_id, self.minted),
        };
        self.minted += 1;

        caller_handles.handles.push(&handle);
        self.callers.insert(account_id, &caller_handles);
        self.positions.insert(&handle, &position);

        return handle;
    }

    pub fn rounds_of(&self, account_id: &AccountId) -> Vec<RoundId>{
        self.get_handles(account_id)
            .handles
            .iter()
            .map(|handle| handle.round_id)
            .collect()
    }
}

impl Contract{
    /// Hands `tickets` to `player` inside `round`: extends the existing
    /// participation or opens a new one at the next free position.
    /// `round` must be persisted by the caller afterwards.
    pub(crate) fn record_tickets(&mut self, round: &mut Round, player: &AccountId, tickets: &TicketRange) -> Result<Position, LotteryError>{
        match self.players.position_of(player, round.id) {
            Some(position) => {
                let mut participation = round
                    .participations
                    .get(u64::from(position))
                    .filter(|participation| participation.player == *player)
                    .ok_or(LotteryError::CorruptedIndex(round.id))?;

                participation.tickets.extend(tickets.numbers());
                round.participations.replace(u64::from(position), &participation);

                Ok(position)
            }
            None => {
                let position = Position::try_from(round.participations.len())
                    .map_err(|_| LotteryError::CorruptedIndex(round.id))?;

                self.players.enroll(player, round.id, position);
                round.participations.push(&Participation {
                    position,
                    player: player.clone(),
                    tickets: tickets.numbers(),
                });

                Ok(position)
            }
        }
    }

    pub(crate) fn participation_of(&self, round: &Round, player: &AccountId) -> Result<Participation, LotteryError>{
        let position = self
            .players
            .position_of(player, round.id)
            .ok_or_else(|| LotteryError::NotAParticipant(player.clone(), round.id))?;

        round
            .participations
            .get(u64::from(position))
            .filter(|participation| participation.player == *player)
            .ok_or(LotteryError::CorruptedIndex(round.id))
    }
}

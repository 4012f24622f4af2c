pub mod events{
    use common::types::{RoundId, TicketNumber, Timestamp};
    use near_sdk::json_types::U128;
    use near_sdk::{AccountId, Balance, log};
    use near_sdk::serde::{Serialize};
    use near_sdk::serde_json::json;

    use crate::tickets::TicketRange;

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct TicketsEvent<'a> {
        pub account_id: &'a AccountId,
        pub round_id: RoundId,
        pub first_ticket: TicketNumber,
        pub count: u32,
        pub amount: U128,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct PrizeEvent<'a> {
        pub account_id: &'a AccountId,
        pub round_id: RoundId,
        pub amount: U128,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct RoundEvent {
        pub round_id: RoundId,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub closes_at: Option<Timestamp>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub winning_ticket: Option<TicketNumber>,
    }

    fn log_event<T: Serialize>(event: &str, data: T) {
        let event = json!({
            "standard": "lottery",
            "version": "1.0.0",
            "event": event,
            "data": [data]
        });

        log!("EVENT_JSON:{}", event.to_string());
    }

    fn tickets_event(event: &str, account_id: &AccountId, round_id: RoundId, tickets: &TicketRange, amount: Balance){
        log_event(
            event,
            TicketsEvent {
                account_id,
                round_id,
                first_ticket: tickets.first,
                count: tickets.count,
                amount: U128(amount),
            }
        );
    }

    pub fn round_started(round_id: RoundId, closes_at: Timestamp){
        log_event("round_started", RoundEvent { round_id, closes_at: Some(closes_at), winning_ticket: None });
    }

    pub fn tickets_reserved(account_id: &AccountId, round_id: RoundId, tickets: &TicketRange, amount: Balance){
        tickets_event("tickets_reserved", account_id, round_id, tickets, amount);
    }

    pub fn tickets_purchased(account_id: &AccountId, round_id: RoundId, tickets: &TicketRange, amount: Balance){
        tickets_event("tickets_purchased", account_id, round_id, tickets, amount);
    }

    pub fn ticket_payment_failed(account_id: &AccountId, round_id: RoundId, tickets: &TicketRange, amount: Balance){
        tickets_event("ticket_payment_failed", account_id, round_id, tickets, amount);
    }

    pub fn round_closed(round_id: RoundId, winning_ticket: Option<TicketNumber>){
        log_event("round_closed", RoundEvent { round_id, closes_at: None, winning_ticket });
    }

    pub fn prize_paid(account_id: &AccountId, round_id: RoundId, amount: Balance){
        log_event("prize_paid", PrizeEvent { account_id, round_id, amount: U128(amount) });
    }

    pub fn payout_failed(account_id: &AccountId, round_id: RoundId, amount: Balance){
        log_event("payout_failed", PrizeEvent { account_id, round_id, amount: U128(amount) });
    }

    pub fn round_deleted(round_id: RoundId){
        log_event("round_deleted", RoundEvent { round_id, closes_at: None, winning_ticket: None });
    }
}

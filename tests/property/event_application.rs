// Copyright 2025 Cowboy AI, LLC.

//! Property-Based Tests for the Portfolio Fold
//!
//! This module uses proptest to verify fundamental properties of the
//! portfolio state reducer. These tests prove properties that must hold
//! for all valid event sequences, including sequences the reducer rejects.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use portfolio_domain::{
    OrderId, OrderPlacement, PortfolioError, PortfolioEvent, PortfolioState, Side, Symbol,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate currency amounts as exact cents
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate ticker symbols from a small pool so sequences interact
fn symbol() -> impl Strategy<Value = Symbol> {
    prop::sample::select(vec!["ACME", "IBM", "MSFT", "BRK.B"])
        .prop_map(|s| Symbol::new(s).unwrap())
}

/// Generate order ids deterministically from the strategy input
fn order_id() -> impl Strategy<Value = OrderId> {
    any::<u128>().prop_map(|n| OrderId::from_uuid(Uuid::from_u128(n)))
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// Generate arbitrary portfolio events, including ones the reducer will
/// reject as invariant violations
fn portfolio_event() -> impl Strategy<Value = PortfolioEvent> {
    prop_oneof![
        amount().prop_map(|amount| PortfolioEvent::TransferReceived { amount }),
        amount().prop_map(|amount| PortfolioEvent::TransferSent { amount }),
        (symbol(), 0u64..1_000)
            .prop_map(|(symbol, shares)| PortfolioEvent::SharesCredited { symbol, shares }),
        (symbol(), 0u64..1_000)
            .prop_map(|(symbol, shares)| PortfolioEvent::SharesDebited { symbol, shares }),
        (order_id(), symbol(), 1u64..1_000, side()).prop_map(
            |(order_id, symbol, shares, side)| PortfolioEvent::OrderPlaced {
                order: OrderPlacement {
                    order_id,
                    symbol,
                    shares,
                    side,
                },
            }
        ),
        (order_id(), symbol(), 1u64..100, amount()).prop_map(
            |(order_id, symbol, shares, share_price)| PortfolioEvent::SharesBought {
                order_id,
                symbol,
                shares,
                share_price,
            }
        ),
        (order_id(), symbol(), 1u64..100, amount()).prop_map(
            |(order_id, symbol, shares, share_price)| PortfolioEvent::SharesSold {
                order_id,
                symbol,
                shares,
                share_price,
            }
        ),
        order_id().prop_map(|order_id| PortfolioEvent::OrderFailed { order_id }),
    ]
}

fn event_sequence() -> impl Strategy<Value = Vec<PortfolioEvent>> {
    prop::collection::vec(portfolio_event(), 0..40)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: the fold is deterministic
    ///
    /// The same event sequence always produces the same final state,
    /// or the same rejection.
    #[test]
    fn prop_fold_is_deterministic(events in event_sequence()) {
        let once = PortfolioState::replay("Alice", events.iter());
        let twice = PortfolioState::replay("Alice", events.iter());

        prop_assert_eq!(once, twice);
    }

    /// Property: transfers are inverse operations
    ///
    /// Receiving an amount and then sending the same amount leaves
    /// funds exactly where they started.
    #[test]
    fn prop_transfer_round_trip_leaves_funds_unchanged(seed in amount(), a in amount()) {
        let state = PortfolioState::initial("Alice")
            .transition(&PortfolioEvent::TransferReceived { amount: seed })
            .unwrap();
        let funds_before = state.funds();

        let state = state
            .transition(&PortfolioEvent::TransferReceived { amount: a })
            .unwrap()
            .transition(&PortfolioEvent::TransferSent { amount: a })
            .unwrap();

        prop_assert_eq!(state.funds(), funds_before);
    }

    /// Property: folding in chunks equals folding all at once
    ///
    /// fold(events1 ++ events2) == fold(fold(events1), events2), and when
    /// the first chunk is rejected the whole fold is rejected identically.
    #[test]
    fn prop_chunked_fold_equals_whole_fold(
        first in event_sequence(),
        second in event_sequence(),
    ) {
        let mut whole = first.clone();
        whole.extend(second.iter().cloned());
        let folded_whole = PortfolioState::replay("Alice", whole.iter());

        match PortfolioState::replay("Alice", first.iter()) {
            Ok(mid) => {
                let folded_chunks = second
                    .iter()
                    .try_fold(mid, |state, event| state.transition(event));
                prop_assert_eq!(folded_whole, folded_chunks);
            }
            Err(err) => prop_assert_eq!(folded_whole, Err(err)),
        }
    }

    /// Property: replay is exactly the stepwise transition fold
    #[test]
    fn prop_replay_equals_stepwise_transitions(events in event_sequence()) {
        let stepwise = events
            .iter()
            .try_fold(PortfolioState::initial("Alice"), |state, event| {
                state.transition(event)
            });

        prop_assert_eq!(PortfolioState::replay("Alice", events.iter()), stepwise);
    }

    /// Property: the closed portfolio absorbs every event
    ///
    /// No event has any effect once closed, and reported funds stay zero.
    #[test]
    fn prop_closed_absorbs_every_event(event in portfolio_event()) {
        let result = PortfolioState::Closed.transition(&event);

        let is_no_transition = matches!(result, Err(PortfolioError::NoTransition { .. }));
        prop_assert!(is_no_transition);
        prop_assert_eq!(PortfolioState::Closed.funds(), Decimal::ZERO);
    }

    /// Property: a failed order moves its id and nothing else
    ///
    /// Funds and holdings are untouched; the id leaves the active map and
    /// lands in the completed set.
    #[test]
    fn prop_failed_order_moves_id_without_movement(
        seed in amount(),
        order_id in order_id(),
        symbol in symbol(),
        shares in 1u64..1_000,
        side in side(),
    ) {
        let placed = PortfolioState::initial("Alice")
            .transition(&PortfolioEvent::TransferReceived { amount: seed })
            .unwrap()
            .transition(&PortfolioEvent::OrderPlaced {
                order: OrderPlacement { order_id, symbol, shares, side },
            })
            .unwrap();

        let failed = placed
            .transition(&PortfolioEvent::OrderFailed { order_id })
            .unwrap();

        prop_assert_eq!(failed.funds(), placed.funds());
        if let PortfolioState::Open(open) = &failed {
            prop_assert!(open.holdings.is_empty());
            prop_assert!(!open.active_orders.contains_key(&order_id));
            prop_assert!(open.completed_orders.contains(&order_id));
        } else {
            prop_assert!(false, "state must remain open");
        }
    }
}

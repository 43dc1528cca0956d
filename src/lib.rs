// Copyright 2025 Cowboy AI, LLC.

//! Portfolio Domain Module
//!
//! This module implements the brokerage Portfolio domain using
//! Domain-Driven Design and Event Sourcing principles. The Portfolio domain
//! models a single customer portfolio: its cash balance, share holdings,
//! in-flight and completed orders, loyalty tier, and lifecycle phase.
//!
//! ## Architecture
//!
//! The domain follows these principles:
//!
//! 1. **Event Sourcing**: current state is the left fold of the journal's
//!    events, never directly mutated storage
//! 2. **Pure Transitions**: `(State, Event) → Result<State>` with no I/O,
//!    no clock, no side effects
//! 3. **Closed Lifecycle**: `Open → Liquidating → Closed`, forward only,
//!    with `Closed` absorbing every event
//! 4. **Typed Rejection**: an event with no effect in the current phase is
//!    a `NoTransition` result, never a masked exception; invariant
//!    violations (negative funds or holdings) are their own error kind
//! 5. **Value Objects**: immutable, validated data types
//!
//! Command validation, the durable journal, transport, and price lookups
//! are external collaborators; this crate only folds accepted events.
//!
//! ## Usage
//!
//! ```rust
//! use portfolio_domain::{PortfolioEvent, PortfolioState};
//! use rust_decimal::Decimal;
//!
//! let state = PortfolioState::initial("Alice");
//! let deposit = PortfolioEvent::TransferReceived {
//!     amount: "250.00".parse().unwrap(),
//! };
//!
//! // Live application and journal replay use the same transition function.
//! let state = state.transition(&deposit).unwrap();
//! assert_eq!(state.funds(), "250.00".parse::<Decimal>().unwrap());
//!
//! let replayed = PortfolioState::replay("Alice", [&deposit]).unwrap();
//! assert_eq!(replayed, state);
//! ```

pub mod events;
pub mod state;
pub mod value_objects;
pub mod views;

// Re-export commonly used types
pub use events::{OrderPlacement, PortfolioEvent};
pub use state::{LiquidatingPortfolio, OpenPortfolio, PortfolioState, StateVisitor};
pub use value_objects::{
    Holdings, InvariantViolation, LoyaltyLevel, OrderId, PortfolioError, Result, Side, Symbol,
};
pub use views::{valued_holdings, PortfolioSummary, ValuedHolding};

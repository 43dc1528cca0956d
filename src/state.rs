// Copyright 2025 Cowboy AI, LLC.

//! Portfolio State and Transition Function
//!
//! The portfolio lifecycle is a closed set of phases, moving forward only:
//!
//! ```text
//! Open ──► Liquidating ──► Closed (terminal, absorbing)
//! ```
//!
//! State is reconstructed by folding the journal's events left to right
//! through [`PortfolioState::transition`], starting from
//! [`PortfolioState::initial`]. The transition function is pure and
//! deterministic: it takes an immutable prior state, performs no I/O, and
//! produces a new state or a typed rejection. Every (phase, event) pair is
//! dispatched by an exhaustive match - an event with no defined effect in
//! the current phase yields [`PortfolioError::NoTransition`], which is
//! always distinguishable from an invariant fault.

use super::events::*;
use super::value_objects::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

// ============================================================================
// State Variants
// ============================================================================

/// Normal trading phase: the portfolio accepts transfers, share movements,
/// and order bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPortfolio {
    pub funds: Decimal,
    pub name: String,
    pub loyalty_level: LoyaltyLevel,
    pub holdings: Holdings,
    /// Orders awaiting settlement, keyed by order id, with their original
    /// placement details
    pub active_orders: HashMap<OrderId, OrderPlacement>,
    /// Orders resolved by settlement or failure
    pub completed_orders: HashSet<OrderId>,
}

/// Winding-down phase: positions are being sold off elsewhere in the
/// system; order bookkeeping is no longer retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidatingPortfolio {
    pub funds: Decimal,
    pub name: String,
    pub loyalty_level: LoyaltyLevel,
    pub holdings: Holdings,
}

/// Lifecycle phase of a portfolio aggregate.
///
/// Exactly one variant is active at a time, each carrying only the fields
/// meaningful in that phase. `Closed` carries no data at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortfolioState {
    Open(OpenPortfolio),
    Liquidating(LiquidatingPortfolio),
    Closed,
}

// ============================================================================
// Construction and Lifecycle
// ============================================================================

impl OpenPortfolio {
    /// Initial state at portfolio opening: zero funds, default loyalty
    /// tier, empty holdings and order books.
    pub fn initial(name: impl Into<String>) -> Self {
        Self {
            funds: Decimal::ZERO,
            name: name.into(),
            loyalty_level: LoyaltyLevel::default(),
            holdings: Holdings::new(),
            active_orders: HashMap::new(),
            completed_orders: HashSet::new(),
        }
    }

    /// Move the portfolio into its winding-down phase.
    ///
    /// Called by the command layer when liquidation starts; the lifecycle
    /// only moves forward, never back to `Open`. Order bookkeeping is
    /// dropped - remaining settlements are handled outside this core.
    pub fn start_liquidation(&self) -> LiquidatingPortfolio {
        LiquidatingPortfolio {
            funds: self.funds,
            name: self.name.clone(),
            loyalty_level: self.loyalty_level,
            holdings: self.holdings.clone(),
        }
    }
}

impl PortfolioState {
    /// Initial state for a freshly opened portfolio
    pub fn initial(name: impl Into<String>) -> Self {
        PortfolioState::Open(OpenPortfolio::initial(name))
    }

    /// Reconstruct state by folding an ordered event sequence from the
    /// initial state. The fold stops at the first rejected event; replay
    /// policy belongs to the caller.
    pub fn replay<'a, I>(name: impl Into<String>, events: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a PortfolioEvent>,
    {
        events
            .into_iter()
            .try_fold(Self::initial(name), |state, event| state.transition(event))
    }
}

// ============================================================================
// Transition Function
// ============================================================================

impl PortfolioState {
    /// State transition function: from a given state and event, produce the
    /// resulting state.
    ///
    /// The same function drives live event application, journal replay, and
    /// projections. Events applied to `Liquidating` or `Closed` yield
    /// [`PortfolioError::NoTransition`]; `Closed` in particular absorbs
    /// everything.
    pub fn transition(&self, event: &PortfolioEvent) -> Result<Self> {
        match self {
            PortfolioState::Open(state) => Ok(PortfolioState::Open(state.apply(event)?)),
            PortfolioState::Liquidating(_) | PortfolioState::Closed => {
                Err(PortfolioError::NoTransition {
                    state: self.phase(),
                    event: event.event_type(),
                })
            }
        }
    }
}

impl OpenPortfolio {
    /// Fold one event into the open state, producing the next state.
    ///
    /// Every event variant has an explicit arm; rejections can only be
    /// invariant violations, surfaced before any field is touched.
    fn apply(&self, event: &PortfolioEvent) -> Result<Self> {
        match event {
            PortfolioEvent::TransferReceived { amount } => {
                Ok(self.with_funds(self.funds + amount))
            }

            PortfolioEvent::TransferSent { amount } => {
                Ok(self.with_funds(self.debit_funds(*amount)?))
            }

            PortfolioEvent::SharesCredited { symbol, shares } => {
                Ok(self.with_holdings(self.holdings.add(symbol, *shares)))
            }

            PortfolioEvent::SharesDebited { symbol, shares } => {
                Ok(self.with_holdings(self.holdings.remove(symbol, *shares)?))
            }

            PortfolioEvent::OrderPlaced { order } => {
                let mut next = self.clone();
                next.active_orders.insert(order.order_id, order.clone());
                Ok(next)
            }

            PortfolioEvent::SharesBought {
                order_id,
                symbol,
                shares,
                share_price,
            } => {
                let funds = self.debit_funds(share_price * Decimal::from(*shares))?;
                Ok(Self {
                    funds,
                    holdings: self.holdings.add(symbol, *shares),
                    ..self.resolve_order(*order_id)
                })
            }

            PortfolioEvent::SharesSold {
                order_id,
                symbol,
                shares,
                share_price,
            } => Ok(Self {
                funds: self.funds + share_price * Decimal::from(*shares),
                holdings: self.holdings.remove(symbol, *shares)?,
                ..self.resolve_order(*order_id)
            }),

            PortfolioEvent::OrderFailed { order_id } => Ok(self.resolve_order(*order_id)),
        }
    }

    fn with_funds(&self, funds: Decimal) -> Self {
        Self {
            funds,
            ..self.clone()
        }
    }

    fn with_holdings(&self, holdings: Holdings) -> Self {
        Self {
            holdings,
            ..self.clone()
        }
    }

    /// Checked funds debit; the cash balance must never go negative
    fn debit_funds(&self, debit: Decimal) -> std::result::Result<Decimal, InvariantViolation> {
        if debit > self.funds {
            warn!(balance = %self.funds, %debit, "funds debit would overdraw cash balance");
            return Err(InvariantViolation::NegativeFunds {
                balance: self.funds,
                debit,
            });
        }
        Ok(self.funds - debit)
    }

    /// Move an order id from the active map into the completed set.
    ///
    /// An id is a member of at most one of the two collections; resolving
    /// an id that was never active still records it as completed.
    fn resolve_order(&self, order_id: OrderId) -> Self {
        let mut next = self.clone();
        next.active_orders.remove(&order_id);
        next.completed_orders.insert(order_id);
        next
    }
}

// ============================================================================
// Query Surface
// ============================================================================

impl PortfolioState {
    /// Cash balance, defined for every phase; pinned to zero once closed
    pub fn funds(&self) -> Decimal {
        match self {
            PortfolioState::Open(state) => state.funds,
            PortfolioState::Liquidating(state) => state.funds,
            PortfolioState::Closed => Decimal::ZERO,
        }
    }

    /// Whether the portfolio can take new orders (only while open)
    pub fn accepts_orders(&self) -> bool {
        matches!(self, PortfolioState::Open(_))
    }

    /// Diagnostic label for the current phase
    pub fn phase(&self) -> &'static str {
        match self {
            PortfolioState::Open(_) => "open",
            PortfolioState::Liquidating(_) => "liquidating",
            PortfolioState::Closed => "closed",
        }
    }
}

impl fmt::Display for PortfolioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phase())
    }
}

// ============================================================================
// Exhaustive Read-Side Dispatch
// ============================================================================

/// Exhaustive dispatch over the portfolio lifecycle phases.
///
/// Readers implement this to branch over every phase without a fallback
/// arm: adding a phase breaks every visitor at compile time instead of
/// silently falling through at runtime.
pub trait StateVisitor {
    type Output;

    fn visit_open(&mut self, state: &OpenPortfolio) -> Self::Output;
    fn visit_liquidating(&mut self, state: &LiquidatingPortfolio) -> Self::Output;
    fn visit_closed(&mut self) -> Self::Output;
}

impl PortfolioState {
    /// Dispatch a visitor over the current phase
    pub fn visit<V: StateVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            PortfolioState::Open(state) => visitor.visit_open(state),
            PortfolioState::Liquidating(state) => visitor.visit_liquidating(state),
            PortfolioState::Closed => visitor.visit_closed(),
        }
    }
}

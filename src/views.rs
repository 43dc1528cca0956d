// Copyright 2025 Cowboy AI, LLC.

//! Read-Side Views
//!
//! Pure read models computed from portfolio state. Nothing here performs
//! I/O: market prices come in as a caller-supplied quote function, and the
//! summary view is built through the exhaustive [`StateVisitor`] dispatch.

use super::state::*;
use super::value_objects::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding enriched with its market value.
///
/// The market value is absent when no quote is available for the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuedHolding {
    pub symbol: Symbol,
    pub share_count: u64,
    pub market_value: Option<Decimal>,
}

/// Value every holding in the ledger with the given quote function,
/// ordered by symbol.
pub fn valued_holdings<F>(holdings: &Holdings, quote: F) -> Vec<ValuedHolding>
where
    F: Fn(&Symbol) -> Option<Decimal>,
{
    let mut rows: Vec<ValuedHolding> = holdings
        .iter()
        .map(|(symbol, shares)| ValuedHolding {
            symbol: symbol.clone(),
            share_count: shares,
            market_value: quote(symbol).map(|price| price * Decimal::from(shares)),
        })
        .collect();
    rows.sort_by(|a, b| a.symbol.as_str().cmp(b.symbol.as_str()));
    rows
}

/// Phase-independent snapshot of a portfolio for display and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub phase: String,
    pub funds: Decimal,
    pub accepts_orders: bool,
    pub symbols_held: usize,
    pub open_orders: usize,
}

impl PortfolioSummary {
    pub fn of(state: &PortfolioState) -> Self {
        state.visit(&mut Summarize)
    }
}

struct Summarize;

impl StateVisitor for Summarize {
    type Output = PortfolioSummary;

    fn visit_open(&mut self, state: &OpenPortfolio) -> PortfolioSummary {
        PortfolioSummary {
            phase: "open".into(),
            funds: state.funds,
            accepts_orders: true,
            symbols_held: state.holdings.len(),
            open_orders: state.active_orders.len(),
        }
    }

    fn visit_liquidating(&mut self, state: &LiquidatingPortfolio) -> PortfolioSummary {
        PortfolioSummary {
            phase: "liquidating".into(),
            funds: state.funds,
            accepts_orders: false,
            symbols_held: state.holdings.len(),
            open_orders: 0,
        }
    }

    fn visit_closed(&mut self) -> PortfolioSummary {
        PortfolioSummary {
            phase: "closed".into(),
            funds: Decimal::ZERO,
            accepts_orders: false,
            symbols_held: 0,
            open_orders: 0,
        }
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Portfolio Domain Value Objects
//!
//! These are the building blocks of the Portfolio domain model.
//! All value objects are immutable and validated on construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Error types for the Portfolio domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// The event has no defined effect in the current lifecycle phase.
    /// An expected, recoverable outcome - not a fault.
    #[error("no transition for {event} in the {state} state")]
    NoTransition {
        state: &'static str,
        event: &'static str,
    },

    /// An event would break a numeric invariant of the portfolio state
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),
}

/// Invariant violations detected while folding an event into state.
///
/// The upstream command layer is supposed to prevent these; the reducer
/// surfaces them as typed, loggable conditions instead of letting holdings
/// or funds go negative.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A debit would remove more shares of a symbol than are held
    #[error("debiting {debited} shares of {symbol} would overdraw the {held} held")]
    ShortHoldings {
        symbol: Symbol,
        held: u64,
        debited: u64,
    },

    /// A debit would drive the cash balance negative
    #[error("debiting {debit} would overdraw the {balance} cash balance")]
    NegativeFunds { balance: Decimal, debit: Decimal },
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

// ============================================================================
// Identity Value Objects
// ============================================================================

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticker symbol for a tradeable instrument
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into();

        if symbol.is_empty() {
            return Err(PortfolioError::InvalidSymbol(
                "Symbol cannot be empty".into(),
            ));
        }

        if symbol.len() > 12 {
            return Err(PortfolioError::InvalidSymbol(
                "Symbol too long (max 12 characters)".into(),
            ));
        }

        // Tickers like BRK.B and BTC-USD are valid
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(PortfolioError::InvalidSymbol(
                "Symbol contains invalid characters".into(),
            ));
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ============================================================================
// Trading Value Objects
// ============================================================================

/// Order side (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Ordered loyalty classification of the portfolio owner.
///
/// Set at portfolio opening; fee/benefit calculations elsewhere in the
/// system read it, the reducer only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoyaltyLevel {
    Bronze,
    Silver,
    Gold,
}

impl Default for LoyaltyLevel {
    fn default() -> Self {
        LoyaltyLevel::Bronze
    }
}

impl fmt::Display for LoyaltyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoyaltyLevel::Bronze => write!(f, "bronze"),
            LoyaltyLevel::Silver => write!(f, "silver"),
            LoyaltyLevel::Gold => write!(f, "gold"),
        }
    }
}

// ============================================================================
// Holdings Ledger
// ============================================================================

/// Share holdings ledger, mapping symbol to held share count.
///
/// Operations return an updated copy rather than mutating in place, so a
/// prior state snapshot is never aliased by a later one. A symbol with zero
/// shares is equivalent to absence: entries are normalized away when a
/// count reaches zero, and `add` of zero shares introduces no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holdings(HashMap<Symbol, u64>);

impl Holdings {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Shares held for a symbol (zero if absent)
    pub fn share_count(&self, symbol: &Symbol) -> u64 {
        self.0.get(symbol).copied().unwrap_or(0)
    }

    /// Copy of this ledger with the symbol's count increased
    pub fn add(&self, symbol: &Symbol, shares: u64) -> Self {
        if shares == 0 {
            return self.clone();
        }
        let mut entries = self.0.clone();
        *entries.entry(symbol.clone()).or_insert(0) += shares;
        Self(entries)
    }

    /// Copy of this ledger with the symbol's count decreased.
    ///
    /// A debit exceeding the held count indicates an inconsistency between
    /// order fulfillment and prior holdings state; it is rejected as an
    /// invariant violation, never clamped to zero.
    pub fn remove(&self, symbol: &Symbol, shares: u64) -> Result<Self> {
        let held = self.share_count(symbol);
        if shares > held {
            warn!(%symbol, held, debited = shares, "share debit would overdraw holdings");
            return Err(InvariantViolation::ShortHoldings {
                symbol: symbol.clone(),
                held,
                debited: shares,
            }
            .into());
        }

        let mut entries = self.0.clone();
        let remaining = held - shares;
        if remaining == 0 {
            entries.remove(symbol);
        } else {
            entries.insert(symbol.clone(), remaining);
        }
        Ok(Self(entries))
    }

    /// Number of distinct symbols held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (symbol, share count) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u64)> {
        self.0.iter().map(|(symbol, shares)| (symbol, *shares))
    }
}

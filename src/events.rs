// Copyright 2025 Cowboy AI, LLC.

//! Portfolio Domain Events
//!
//! All state changes to a portfolio are represented as immutable events.
//! The journal assigns each event its sequence number; the reducer consumes
//! events in journal order and carries no clock or transport metadata of
//! its own.

use super::value_objects::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Entities (Embedded in Events)
// ============================================================================

/// Placement details of an order, retained while the order is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacement {
    pub order_id: OrderId,
    pub symbol: Symbol,
    pub shares: u64,
    pub side: Side,
}

// ============================================================================
// Portfolio Events
// ============================================================================

/// Domain events for the Portfolio aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortfolioEvent {
    /// Cash was transferred into the portfolio
    TransferReceived { amount: Decimal },

    /// Cash was transferred out of the portfolio
    TransferSent { amount: Decimal },

    /// Shares were credited outside of order settlement
    SharesCredited { symbol: Symbol, shares: u64 },

    /// Shares were debited outside of order settlement
    SharesDebited { symbol: Symbol, shares: u64 },

    /// An order was accepted and is awaiting settlement
    OrderPlaced { order: OrderPlacement },

    /// A buy order settled: shares delivered, funds debited
    SharesBought {
        order_id: OrderId,
        symbol: Symbol,
        shares: u64,
        share_price: Decimal,
    },

    /// A sell order settled: shares surrendered, funds credited
    SharesSold {
        order_id: OrderId,
        symbol: Symbol,
        shares: u64,
        share_price: Decimal,
    },

    /// An order was resolved without settling
    OrderFailed { order_id: OrderId },
}

impl PortfolioEvent {
    /// Get event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            PortfolioEvent::TransferReceived { .. } => "TransferReceived",
            PortfolioEvent::TransferSent { .. } => "TransferSent",
            PortfolioEvent::SharesCredited { .. } => "SharesCredited",
            PortfolioEvent::SharesDebited { .. } => "SharesDebited",
            PortfolioEvent::OrderPlaced { .. } => "OrderPlaced",
            PortfolioEvent::SharesBought { .. } => "SharesBought",
            PortfolioEvent::SharesSold { .. } => "SharesSold",
            PortfolioEvent::OrderFailed { .. } => "OrderFailed",
        }
    }

    /// Get the order this event concerns (if any)
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            PortfolioEvent::OrderPlaced { order } => Some(order.order_id),
            PortfolioEvent::SharesBought { order_id, .. } => Some(*order_id),
            PortfolioEvent::SharesSold { order_id, .. } => Some(*order_id),
            PortfolioEvent::OrderFailed { order_id } => Some(*order_id),
            PortfolioEvent::TransferReceived { .. }
            | PortfolioEvent::TransferSent { .. }
            | PortfolioEvent::SharesCredited { .. }
            | PortfolioEvent::SharesDebited { .. } => None,
        }
    }
}

//! Order Aggregate Root
//!
//! The Order aggregate owns the lifecycle of one order. Every status change
//! goes through [`OrderStateMachine`] and records a domain event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::errors::StateError;
use crate::domain::order_lifecycle::events::{
    OrderCancelled, OrderEvent, OrderFilled, OrderPartiallyFilled, OrderRejected, OrderSubmitted,
};
use crate::domain::order_lifecycle::services::OrderStateMachine;
use crate::domain::order_lifecycle::value_objects::{
    CancelReason, MatchDecision, OrderKind, OrderSide, OrderStatus, RejectReason,
};
use crate::domain::shared::{AccountId, OrderId, Symbol, Timestamp};

/// Command to create a new order from fully validated fields.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Owning account.
    pub account_id: AccountId,
    /// Market symbol.
    pub symbol: Symbol,
    /// Side.
    pub side: OrderSide,
    /// Kind.
    pub kind: OrderKind,
    /// Size, strictly positive.
    pub size: Decimal,
    /// Limit price, or the mark price for market orders.
    pub price: Decimal,
    /// Leverage within the market cap.
    pub leverage: u32,
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    account_id: AccountId,
    symbol: Symbol,
    side: OrderSide,
    kind: OrderKind,
    size: Decimal,
    price: Decimal,
    leverage: u32,
    status: OrderStatus,
    remaining_size: Decimal,
    reject_reason: Option<RejectReason>,
    cancel_reason: Option<CancelReason>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Create a new `Pending` order with a fresh id.
    ///
    /// Generates an `OrderSubmitted` event.
    #[must_use]
    pub fn new(cmd: CreateOrderCommand) -> Self {
        Self::new_with_id(OrderId::generate(), cmd, Timestamp::now())
    }

    /// Create a new `Pending` order with a caller-supplied id and clock.
    #[must_use]
    pub fn new_with_id(id: OrderId, cmd: CreateOrderCommand, now: Timestamp) -> Self {
        let mut order = Self {
            id: id.clone(),
            account_id: cmd.account_id.clone(),
            symbol: cmd.symbol.clone(),
            side: cmd.side,
            kind: cmd.kind,
            size: cmd.size,
            price: cmd.price,
            leverage: cmd.leverage,
            status: OrderStatus::Pending,
            remaining_size: cmd.size,
            reject_reason: None,
            cancel_reason: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        order.events.push(OrderEvent::Submitted(OrderSubmitted {
            order_id: id,
            account_id: cmd.account_id,
            symbol: cmd.symbol,
            side: cmd.side,
            kind: cmd.kind,
            size: cmd.size,
            price: cmd.price,
            leverage: cmd.leverage,
            occurred_at: now,
        }));

        order
    }

    // Getters

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Owning account.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Market symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Kind.
    #[must_use]
    pub const fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Total size.
    #[must_use]
    pub const fn size(&self) -> Decimal {
        self.size
    }

    /// Recorded price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Leverage multiplier.
    #[must_use]
    pub const fn leverage(&self) -> u32 {
        self.leverage
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Size not yet filled.
    #[must_use]
    pub const fn remaining_size(&self) -> Decimal {
        self.remaining_size
    }

    /// Size filled so far.
    #[must_use]
    pub fn filled_size(&self) -> Decimal {
        self.size - self.remaining_size
    }

    /// Rejection reason, set only when rejected.
    #[must_use]
    pub const fn reject_reason(&self) -> Option<&RejectReason> {
        self.reject_reason.as_ref()
    }

    /// Cancellation reason, set only when cancelled.
    #[must_use]
    pub const fn cancel_reason(&self) -> Option<&CancelReason> {
        self.cancel_reason.as_ref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[OrderEvent] {
        &self.events
    }

    /// Take the recorded events, leaving none behind.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    // Transitions

    /// Apply a decision from the matching authority.
    ///
    /// Returns the size newly filled by this decision (zero for a rejection).
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the current status does not allow
    /// the decision, or `InvalidRemaining` for a partial fill that does not
    /// shrink the open size.
    pub fn apply_decision(&mut self, decision: &MatchDecision) -> Result<Decimal, StateError> {
        OrderStateMachine::validate_transition(self.status, decision.target_status())?;
        let now = self.next_update_time();

        match decision {
            MatchDecision::Filled => {
                let filled = self.remaining_size;
                self.remaining_size = Decimal::ZERO;
                self.status = OrderStatus::Filled;
                self.updated_at = now;
                self.events.push(OrderEvent::Filled(OrderFilled {
                    order_id: self.id.clone(),
                    filled,
                    occurred_at: now,
                }));
                Ok(filled)
            }
            MatchDecision::PartiallyFilled { remaining } => {
                let remaining = *remaining;
                if remaining <= Decimal::ZERO || remaining >= self.remaining_size {
                    return Err(StateError::InvalidRemaining {
                        remaining,
                        open: self.remaining_size,
                    });
                }
                let filled = self.remaining_size - remaining;
                self.remaining_size = remaining;
                self.status = OrderStatus::PartiallyFilled;
                self.updated_at = now;
                self.events
                    .push(OrderEvent::PartiallyFilled(OrderPartiallyFilled {
                        order_id: self.id.clone(),
                        filled,
                        remaining,
                        occurred_at: now,
                    }));
                Ok(filled)
            }
            MatchDecision::Rejected { reason } => {
                self.status = OrderStatus::Rejected;
                self.reject_reason = Some(reason.clone());
                self.updated_at = now;
                self.events.push(OrderEvent::Rejected(OrderRejected {
                    order_id: self.id.clone(),
                    reason: reason.clone(),
                    occurred_at: now,
                }));
                Ok(Decimal::ZERO)
            }
        }
    }

    /// Cancel the order. Any filled part stays filled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the order is terminal.
    pub fn cancel(&mut self, reason: CancelReason) -> Result<(), StateError> {
        OrderStateMachine::validate_transition(self.status, OrderStatus::Cancelled)?;
        let now = self.next_update_time();

        self.status = OrderStatus::Cancelled;
        self.cancel_reason = Some(reason.clone());
        self.updated_at = now;
        self.events.push(OrderEvent::Cancelled(OrderCancelled {
            order_id: self.id.clone(),
            reason,
            remaining: self.remaining_size,
            occurred_at: now,
        }));
        Ok(())
    }

    fn next_update_time(&self) -> Timestamp {
        Timestamp::now().not_before(self.updated_at)
    }
}

//! In-memory state behind the orders table.
//!
//! The board holds the orders currently shown to admins together with a
//! per-order refund flag. Two write paths exist and they stay different:
//!
//! - the status selector writes optimistically ([`OrdersBoard::set_status`]);
//! - a refund writes only after the order service confirms
//!   ([`RefundGuard::confirm`]).
//!
//! The lock is synchronous and is never held across an `.await`; handlers
//! take a [`RefundGuard`], release the lock, and call the service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bazaar_core::{Order, OrderId, OrderStatus};
use thiserror::Error;

/// Per-order refund progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefundState {
    #[default]
    Idle,
    InProgress,
}

/// Why a refund could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundRejection {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("order {id} is {status} and cannot be refunded")]
    NotRefundable { id: OrderId, status: OrderStatus },

    #[error("a refund for order {0} is already in progress")]
    InFlight(OrderId),
}

/// An order plus its refund state, copied out of the board for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub order: Order,
    pub refund: RefundState,
}

impl OrderEntry {
    #[must_use]
    pub fn is_refunding(&self) -> bool {
        self.refund == RefundState::InProgress
    }

    /// Whether the refund action is enabled for this row.
    #[must_use]
    pub fn can_refund(&self) -> bool {
        self.order.order_status.is_refundable() && !self.is_refunding()
    }
}

#[derive(Debug, Default)]
struct BoardInner {
    orders: Vec<Order>,
    refunds: HashMap<OrderId, RefundState>,
}

impl BoardInner {
    fn position(&self, id: &OrderId) -> Option<usize> {
        self.orders.iter().position(|order| &order.id == id)
    }

    fn refund_state(&self, id: &OrderId) -> RefundState {
        self.refunds.get(id).copied().unwrap_or_default()
    }

    fn entry(&self, order: &Order) -> OrderEntry {
        OrderEntry {
            order: order.clone(),
            refund: self.refund_state(&order.id),
        }
    }

    fn set_status(&mut self, id: &OrderId, status: OrderStatus) -> Option<OrderEntry> {
        let idx = self.position(id)?;
        let order = self.orders.get_mut(idx)?;
        order.order_status = status;
        let order = order.clone();
        Some(self.entry(&order))
    }
}

/// Orders shown in the admin table, in their original order.
#[derive(Debug, Default)]
pub struct OrdersBoard {
    inner: Mutex<BoardInner>,
}

impl OrdersBoard {
    /// Create a board from the initial order sequence.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            inner: Mutex::new(BoardInner {
                orders,
                refunds: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardInner> {
        // A panic while holding the lock cannot leave the vector half-written:
        // every mutation is a single field assignment.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().orders.is_empty()
    }

    /// Copy of every row, in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<OrderEntry> {
        let inner = self.lock();
        inner.orders.iter().map(|order| inner.entry(order)).collect()
    }

    /// Copy of a single row.
    #[must_use]
    pub fn entry(&self, id: &OrderId) -> Option<OrderEntry> {
        let inner = self.lock();
        let idx = inner.position(id)?;
        inner.orders.get(idx).map(|order| inner.entry(order))
    }

    #[must_use]
    pub fn refund_state(&self, id: &OrderId) -> RefundState {
        self.lock().refund_state(id)
    }

    /// Apply a status chosen in the selector.
    ///
    /// Optimistic: the new status is shown immediately, with no round-trip
    /// to the order service. Returns `None` for an unknown order.
    pub fn set_status(&self, id: &OrderId, status: OrderStatus) -> Option<OrderEntry> {
        self.lock().set_status(id, status)
    }

    /// Mark a refund as in flight for one order.
    ///
    /// The returned guard clears the flag when dropped, on every exit path.
    /// Other orders are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a [`RefundRejection`] when the order is unknown, already
    /// cancelled or delivered, or has a refund in flight.
    pub fn begin_refund(self: &Arc<Self>, id: &OrderId) -> Result<RefundGuard, RefundRejection> {
        let mut inner = self.lock();

        let status = inner
            .position(id)
            .and_then(|idx| inner.orders.get(idx))
            .map(|order| order.order_status)
            .ok_or_else(|| RefundRejection::NotFound(id.clone()))?;

        if !status.is_refundable() {
            return Err(RefundRejection::NotRefundable {
                id: id.clone(),
                status,
            });
        }

        if inner.refund_state(id) == RefundState::InProgress {
            return Err(RefundRejection::InFlight(id.clone()));
        }

        inner.refunds.insert(id.clone(), RefundState::InProgress);

        Ok(RefundGuard {
            board: Arc::clone(self),
            order_id: id.clone(),
        })
    }
}

/// Marks one order's refund as in flight for as long as it lives.
#[derive(Debug)]
#[must_use = "dropping the guard immediately clears the in-flight flag"]
pub struct RefundGuard {
    board: Arc<OrdersBoard>,
    order_id: OrderId,
}

impl RefundGuard {
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Record the status confirmed by the order service.
    pub fn confirm(&self, status: OrderStatus) -> Option<OrderEntry> {
        self.board.set_status(&self.order_id, status)
    }
}

impl Drop for RefundGuard {
    fn drop(&mut self) {
        self.board
            .lock()
            .refunds
            .insert(self.order_id.clone(), RefundState::Idle);
    }
}

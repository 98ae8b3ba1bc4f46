// ============================================================================
// Half-Book
// Resting orders of one side, sorted by priority and indexed by id
// ============================================================================

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::ordering::{BookOrdering, PriorityKey};
use crate::domain::{Order, OrderId, Side, Tradable};
use std::collections::{BTreeMap, HashMap};

/// One side of the order book.
///
/// Two collections are kept in sync: a `BTreeMap` sorted by the side's
/// priority key (the first entry is the best order) and a `HashMap` from
/// order id to key for O(log n) removal by id. Every mutation goes through
/// methods that update both or neither.
///
/// All contained orders share the book's tradable and side.
pub struct HalfBook {
    side: Side,
    tradable: Tradable,
    ordering: Box<dyn BookOrdering>,
    queue: BTreeMap<PriorityKey, Order>,
    index: HashMap<OrderId, PriorityKey>,
}

impl HalfBook {
    /// Create an empty half-book for one side of one tradable.
    pub fn new(side: Side, tradable: Tradable, ordering: Box<dyn BookOrdering>) -> Self {
        Self {
            side,
            tradable,
            ordering,
            queue: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tradable(&self) -> &Tradable {
        &self.tradable
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a resting order.
    ///
    /// # Errors
    /// `InvalidTradable` when the order trades a different instrument,
    /// `WrongSide` when its side does not match the book, `DuplicateOrder`
    /// when an order with the same id is already resting. The book is
    /// unchanged on error.
    pub fn add(&mut self, order: Order) -> EngineResult<()> {
        if order.tradable() != &self.tradable {
            return Err(EngineError::InvalidTradable);
        }
        if order.side() != self.side {
            return Err(EngineError::WrongSide);
        }
        if self.index.contains_key(&order.id()) {
            return Err(EngineError::DuplicateOrder);
        }

        let key = self.ordering.priority(&order);
        self.index.insert(order.id(), key);
        let displaced = self.queue.insert(key, order);

        // The key embeds the unique id, so a collision means corruption.
        debug_assert!(displaced.is_none(), "priority key collision");
        Ok(())
    }

    /// Remove and return the order with the given id, if resting.
    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        let key = self.index.remove(&id)?;
        let order = self.queue.remove(&key);
        debug_assert!(order.is_some(), "index and queue diverged");
        order
    }

    /// Remove and return the best order.
    pub fn pop_best(&mut self) -> Option<Order> {
        let (_, order) = self.queue.pop_first()?;
        let key = self.index.remove(&order.id());
        debug_assert!(key.is_some(), "index and queue diverged");
        Some(order)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The best order, without removing it.
    pub fn peek_best(&self) -> Option<&Order> {
        self.queue.first_key_value().map(|(_, order)| order)
    }

    /// First order in priority order matching the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<&Order>
    where
        P: Fn(&Order) -> bool,
    {
        self.queue.values().find(|order| predicate(order))
    }

    /// All orders matching the predicate, in priority order.
    ///
    /// Returns `None` when nothing matches; a returned collection is never
    /// empty.
    pub fn filter<P>(&self, predicate: P) -> Option<Vec<&Order>>
    where
        P: Fn(&Order) -> bool,
    {
        let matches: Vec<&Order> = self.queue.values().filter(|order| predicate(order)).collect();
        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Resting orders in priority order, best first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.queue.values()
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Verify that the sorted queue and the id index describe the same
    /// multiset of orders.
    ///
    /// # Errors
    /// `InvariantViolation` when the views diverge.
    pub fn check_invariants(&self) -> EngineResult<()> {
        if self.queue.len() != self.index.len() {
            return Err(EngineError::InvariantViolation);
        }
        for (key, order) in &self.queue {
            if self.index.get(&order.id()) != Some(key) {
                return Err(EngineError::InvariantViolation);
            }
            if order.side() != self.side || order.tradable() != &self.tradable {
                return Err(EngineError::InvariantViolation);
            }
        }
        Ok(())
    }
}

use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::{debug, trace};

use crate::orders::Order;

/// Heap key for max-heap primitives such as [`BinaryHeap`]: the order that
/// takes precedence compares as *greater*, so it is popped first.
#[derive(Debug, Clone)]
pub struct ByPrecedence(pub Order);

impl PartialEq for ByPrecedence {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByPrecedence {}

impl PartialOrd for ByPrecedence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByPrecedence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.precedence_cmp(&other.0)
    }
}

/// Heap key for min-heap primitives: the order that takes precedence
/// compares as *smaller*, so it surfaces first.
#[derive(Debug, Clone)]
pub struct MinHeapKey(pub Order);

impl PartialEq for MinHeapKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinHeapKey {}

impl PartialOrd for MinHeapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinHeapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.precedence_cmp(&self.0)
    }
}

/// Pending orders, popped highest precedence first.
///
/// Not synchronised; wrap it in a `Mutex` when shared between threads.
#[derive(Debug, Default, Clone)]
pub struct OrderQueue {
    heap: BinaryHeap<ByPrecedence>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, order: Order) {
        trace!("queueing order: {}", order);
        self.heap.push(ByPrecedence(order));
    }

    /// Removes and returns the order with the highest precedence.
    pub fn pop(&mut self) -> Option<Order> {
        let order = self.heap.pop().map(|ByPrecedence(order)| order);
        if let Some(order) = &order {
            debug!("popped order: {}", order);
        }
        order
    }

    pub fn peek(&self) -> Option<&Order> {
        self.heap.peek().map(|key| &key.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the queue, returning orders highest precedence first.
    pub fn into_sorted_vec(self) -> Vec<Order> {
        // BinaryHeap sorts ascending
        self.heap
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|ByPrecedence(order)| order)
            .collect()
    }
}

impl Extend<Order> for OrderQueue {
    fn extend<I: IntoIterator<Item = Order>>(&mut self, iter: I) {
        for order in iter {
            self.push(order);
        }
    }
}

impl FromIterator<Order> for OrderQueue {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        let mut queue = OrderQueue::new();
        queue.extend(iter);
        queue
    }
}

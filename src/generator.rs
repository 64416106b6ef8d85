//! Seeded random orders for tests, demos and benchmarks.
//!
//! Every generated order is an ETH/BTC order with no limit price:
//! - action is buy or sell with equal probability
//! - quantity is a whole number in `[1, 10)`
//! - deposit address is drawn from `[-3, 3)`, made non-negative for buys and
//!   non-positive for sells so a buyer and a seller never share an address
//!   (a crude guard against self-crossing; zero is still shared)
//! - wallet address equals the deposit address
//!
//! The seed is always passed in, so two generators with the same seed and
//! clock yield the same orders.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    clock::Clock,
    errors::OrderResult,
    orders::{Action, Address, LimitPrice, Order},
};

pub const BASE_TOKEN: &str = "ETH";
pub const QUOTE_TOKEN: &str = "BTC";

pub struct OrderGenerator {
    rng: StdRng,
}

impl OrderGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_order(&mut self, clock: &dyn Clock) -> OrderResult<Order> {
        let action = if self.rng.random_bool(0.5) {
            Action::Buy
        } else {
            Action::Sell
        };
        let quantity = f64::from(self.rng.random_range(1..10u32));
        let raw_address: i64 = self.rng.random_range(-3..3);
        let deposit_address = match action {
            Action::Buy => raw_address.abs(),
            Action::Sell => -raw_address.abs(),
        };
        let order = Order::new_with_clock(
            BASE_TOKEN,
            QUOTE_TOKEN,
            action,
            quantity,
            LimitPrice::NoLimit,
            None,
            Address::Id(deposit_address),
            Address::Id(deposit_address),
            clock,
        )?;
        debug!("generated order: {}", order);
        Ok(order)
    }

    pub fn generate(&mut self, count: usize, clock: &dyn Clock) -> OrderResult<Vec<Order>> {
        (0..count).map(|_| self.next_order(clock)).collect()
    }
}

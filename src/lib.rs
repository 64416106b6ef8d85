//! Orders for the DaoCross crossing mechanism and the precedence relation a
//! matching engine uses to pick them.
//!
//! ```
//! use dao_cross::{Action, LimitPrice, Order, OrderQueue};
//!
//! let mut queue = OrderQueue::new();
//! for quantity in [3.0, 7.0, 5.0] {
//!     let order = Order::new("ETH", "BTC", Action::Buy, quantity, LimitPrice::NoLimit, None, 1_i64, 1_i64)?;
//!     queue.push(order);
//! }
//! assert_eq!(queue.pop().map(|o| o.quantity()), Some(7.0));
//! # Ok::<(), dao_cross::OrderError>(())
//! ```

pub mod cli;
pub mod clock;
pub mod errors;
pub mod generator;
pub mod orders;
pub mod queue;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{OrderError, OrderResult};
pub use orders::{Action, Address, LimitPrice, Order, OrderRequest, action_to_int};
pub use queue::{ByPrecedence, MinHeapKey, OrderQueue};

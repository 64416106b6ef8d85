use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;

use crate::{
    clock::{Clock, SystemClock},
    errors::{OrderError, OrderResult},
};

/// Direction of an order.
///
/// - `Buy`: purchase the base token and pay with the quote token.
/// - `Sell`: sell the base token and receive the quote token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    /// Numeric direction used by settlement: `+1` for buy, `-1` for sell.
    pub fn sign(self) -> i8 {
        match self {
            Action::Buy => 1,
            Action::Sell => -1,
        }
    }
}

impl FromStr for Action {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Action::Buy),
            "sell" => Ok(Action::Sell),
            other => Err(OrderError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.write_str("buy"),
            Action::Sell => f.write_str("sell"),
        }
    }
}

/// Translates an action token into its numeric direction.
pub fn action_to_int(action: &str) -> OrderResult<i8> {
    action.parse::<Action>().map(Action::sign)
}

/// Limit price in quote token per base token.
///
/// `NoLimit` is kept as its own variant and only turned into a signed
/// infinity when orders are compared, see [`LimitPrice::effective`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitPrice {
    NoLimit,
    At(f64),
}

impl LimitPrice {
    /// Price used for precedence: `+inf` for an unlimited buy (pays any
    /// price), `-inf` for an unlimited sell (accepts any price).
    pub fn effective(self, action: Action) -> f64 {
        match (self, action) {
            (LimitPrice::At(price), _) => price,
            (LimitPrice::NoLimit, Action::Buy) => f64::INFINITY,
            (LimitPrice::NoLimit, Action::Sell) => f64::NEG_INFINITY,
        }
    }

    // NaN is the "no limit" sentinel at the boundary.
    fn normalized(self) -> Self {
        match self {
            LimitPrice::At(price) if price.is_nan() => LimitPrice::NoLimit,
            other => other,
        }
    }
}

impl From<Option<f64>> for LimitPrice {
    fn from(price: Option<f64>) -> Self {
        match price {
            Some(price) => LimitPrice::At(price).normalized(),
            None => LimitPrice::NoLimit,
        }
    }
}

impl From<f64> for LimitPrice {
    fn from(price: f64) -> Self {
        LimitPrice::from(Some(price))
    }
}

impl Serialize for LimitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LimitPrice::NoLimit => serializer.serialize_none(),
            LimitPrice::At(price) => serializer.serialize_some(price),
        }
    }
}

/// Deposit or wallet address. Opaque: either a numeric id or free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Id(i64),
    Text(String),
}

impl From<i64> for Address {
    fn from(id: i64) -> Self {
        Address::Id(id)
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Address::Text(text.to_string())
    }
}

impl From<String> for Address {
    fn from(text: String) -> Self {
        Address::Text(text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Id(id) => write!(f, "{id}"),
            Address::Text(text) => f.write_str(text),
        }
    }
}

/// A single buy or sell intent for a base/quote token pair.
///
/// Every field is validated and resolved at construction, after which the
/// order is immutable. Orders are ranked against each other with
/// [`Order::precedence_cmp`]:
///
/// 1. higher `quantity` first
/// 2. higher (effective) `limit_price` breaks quantity ties
/// 3. the *later* `timestamp` breaks quantity and price ties
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    base_token: String,
    quote_token: String,
    action: Action,
    quantity: f64,
    limit_price: LimitPrice,
    timestamp: DateTime<Utc>,
    deposit_address: Address,
    wallet_address: Address,
}

impl Order {
    /// Builds an order, stamping it with the system time when `timestamp`
    /// is `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_token: impl Into<String>,
        quote_token: impl Into<String>,
        action: Action,
        quantity: f64,
        limit_price: impl Into<LimitPrice>,
        timestamp: Option<DateTime<Utc>>,
        deposit_address: impl Into<Address>,
        wallet_address: impl Into<Address>,
    ) -> OrderResult<Self> {
        Self::new_with_clock(
            base_token,
            quote_token,
            action,
            quantity,
            limit_price,
            timestamp,
            deposit_address,
            wallet_address,
            &SystemClock,
        )
    }

    /// Same as [`Order::new`] but reads the current time from `clock`.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_clock(
        base_token: impl Into<String>,
        quote_token: impl Into<String>,
        action: Action,
        quantity: f64,
        limit_price: impl Into<LimitPrice>,
        timestamp: Option<DateTime<Utc>>,
        deposit_address: impl Into<Address>,
        wallet_address: impl Into<Address>,
        clock: &dyn Clock,
    ) -> OrderResult<Self> {
        Self::build(
            base_token.into(),
            quote_token.into(),
            action,
            quantity,
            limit_price.into(),
            timestamp,
            deposit_address.into(),
            wallet_address.into(),
            clock,
        )
        .inspect_err(|e| warn!("rejected order: {e}"))
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        base_token: String,
        quote_token: String,
        action: Action,
        quantity: f64,
        limit_price: LimitPrice,
        timestamp: Option<DateTime<Utc>>,
        deposit_address: Address,
        wallet_address: Address,
        clock: &dyn Clock,
    ) -> OrderResult<Self> {
        // +inf is a valid, if extreme, quantity; -inf fails the sign check.
        if quantity.is_nan() {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        if quantity < 0.0 {
            return Err(OrderError::NegativeQuantity(quantity));
        }
        if base_token.is_empty() {
            return Err(OrderError::EmptyToken("base_token"));
        }
        if quote_token.is_empty() {
            return Err(OrderError::EmptyToken("quote_token"));
        }
        Ok(Self {
            base_token,
            quote_token,
            action,
            quantity,
            limit_price: limit_price.normalized(),
            timestamp: timestamp.unwrap_or_else(|| clock.now()),
            deposit_address,
            wallet_address,
        })
    }

    pub fn base_token(&self) -> &str {
        &self.base_token
    }

    pub fn quote_token(&self) -> &str {
        &self.quote_token
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Resolved limit price; never unset (`+inf`/`-inf` when unlimited).
    pub fn limit_price(&self) -> f64 {
        self.limit_price.effective(self.action)
    }

    /// The limit price as supplied, without infinity substitution.
    pub fn limit(&self) -> LimitPrice {
        self.limit_price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn deposit_address(&self) -> &Address {
        &self.deposit_address
    }

    pub fn wallet_address(&self) -> &Address {
        &self.wallet_address
    }

    /// Compares two orders by precedence.
    ///
    /// `Greater` means `self` takes precedence over `other`, `Less` means
    /// `other` does. `Equal` only when quantity, effective limit price and
    /// timestamp all coincide.
    pub fn precedence_cmp(&self, other: &Order) -> Ordering {
        cmp_f64(self.quantity, other.quantity)
            .then_with(|| cmp_f64(self.limit_price(), other.limit_price()))
            // NOTE: the later order wins a full quantity/price tie. This is
            // not the usual earliest-first convention; keep it unless the
            // crossing rules change.
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }

    pub fn takes_precedence(&self, other: &Order) -> bool {
        self.precedence_cmp(other) == Ordering::Greater
    }

    pub fn is_preceded_by(&self, other: &Order) -> bool {
        self.precedence_cmp(other) == Ordering::Less
    }
}

// Quantities and prices are never NaN after construction.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "base_token={} quote_token={} action={} quantity={} limit_price={} timestamp={} deposit_address={} wallet_address={}",
            self.base_token,
            self.quote_token,
            self.action,
            self.quantity,
            self.limit_price(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S%:z"),
            self.deposit_address,
            self.wallet_address,
        )
    }
}

/// An order as received from outside the crate (JSON, CLI input).
///
/// `limit_price` and `timestamp` may be omitted. A NaN limit price also
/// means "no limit"; an empty timestamp means "now".
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub base_token: String,
    pub quote_token: String,
    pub action: String,
    pub quantity: f64,
    #[serde(default)]
    pub limit_price: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub deposit_address: Address,
    pub wallet_address: Address,
}

impl OrderRequest {
    /// Validates the request and resolves it into an [`Order`].
    ///
    /// The action is checked first, so an unknown action is reported even
    /// if other fields are also invalid.
    pub fn into_order(self, clock: &dyn Clock) -> OrderResult<Order> {
        self.resolve(clock)
            .inspect_err(|e| warn!("rejected order request: {e}"))
    }

    fn resolve(self, clock: &dyn Clock) -> OrderResult<Order> {
        let action = self.action.parse::<Action>()?;
        let timestamp = match self.timestamp.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw)?),
        };
        Order::build(
            self.base_token,
            self.quote_token,
            action,
            self.quantity,
            LimitPrice::from(self.limit_price),
            timestamp,
            self.deposit_address,
            self.wallet_address,
            clock,
        )
    }
}

/// Parses an RFC 3339 timestamp (any offset) into a UTC instant.
pub fn parse_timestamp(raw: &str) -> OrderResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| OrderError::InvalidTimestamp(raw.to_string()))
}

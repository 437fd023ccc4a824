//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Issuance**: `Coin`, `UnsignedCoin`, `CoinSource`
//! - **Supply**: `SupplyStatus` and the fixed supply constants
//! - **Primitives**: `Amount`, `CoinId`, `Digest`, `Timestamp`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SourceError;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A quantity of units. Decimal so that the supply cap is exact.
pub type Amount = Decimal;

/// Hex-encoded identifier of a minted coin or a transfer.
pub type CoinId = String;

/// Hex-encoded digest string.
pub type Digest = String;

/// Milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Ticker symbol of the asset.
pub const PI_SYMBOL: &str = "PI";

/// Hard cap on every unit ever minted.
pub const TOTAL_SUPPLY_UNITS: u64 = 100_000_000_000;

/// Fixed USD value of one unit.
pub const PI_VALUE_USD_UNITS: u64 = 314_159;

/// Supply cap as an `Amount`.
pub fn total_supply() -> Amount {
    Decimal::from(TOTAL_SUPPLY_UNITS)
}

/// Fixed USD value per unit as an `Amount`.
pub fn pi_value_usd() -> Amount {
    Decimal::from(PI_VALUE_USD_UNITS)
}

/// Canonical text form of an amount (`10`, `10.0` and `10.00` all render as `10`).
///
/// Every digest and signed message that embeds an amount goes through here,
/// so values that compare equal also hash equal.
pub fn canonical_amount(amount: &Amount) -> String {
    amount.normalize().to_string()
}

/// Current wall-clock time in milliseconds.
pub fn current_timestamp_ms() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

// =============================================================================
// ORIGIN SOURCES
// =============================================================================

/// Declared provenance of newly minted or transferred value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSource {
    /// Block mining rewards.
    Mining,
    /// Ecosystem rewards.
    Rewards,
    /// Peer-to-peer transfer.
    P2p,
}

impl CoinSource {
    /// All sources the asset recognises.
    pub const ALL: [CoinSource; 3] = [CoinSource::Mining, CoinSource::Rewards, CoinSource::P2p];

    /// Wire name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinSource::Mining => "mining",
            CoinSource::Rewards => "rewards",
            CoinSource::P2p => "p2p",
        }
    }
}

impl fmt::Display for CoinSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mining" => Ok(CoinSource::Mining),
            "rewards" => Ok(CoinSource::Rewards),
            "p2p" => Ok(CoinSource::P2p),
            other => Err(SourceError::Unknown(other.to_string())),
        }
    }
}

// =============================================================================
// COIN
// =============================================================================

/// A coin whose supply has been reserved but which is not signed yet.
///
/// [`UnsignedCoin::into_signed`] attaches any bytes as the signature, so
/// holding a [`Coin`] proves nothing by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedCoin {
    /// Coin identifier.
    pub id: CoinId,
    /// Amount actually issued (after any anomaly mitigation).
    pub amount: Amount,
    /// Declared origin.
    pub source: CoinSource,
    /// Issue time.
    pub issued_at: Timestamp,
}

impl UnsignedCoin {
    /// Bytes covered by the issuance signature: `{id}-{amount}-{source}`.
    pub fn message(&self) -> Vec<u8> {
        coin_message(&self.id, &self.amount, self.source)
    }

    /// Attach the signature, producing the immutable coin. The signature is
    /// not checked here.
    pub fn into_signed(self, signature: Vec<u8>) -> Coin {
        Coin {
            id: self.id,
            amount: self.amount,
            source: self.source,
            signature,
            issued_at: self.issued_at,
        }
    }
}

/// A signed, immutable record of minted supply.
///
/// Anyone can build or deserialize a `Coin`. It is authentic only when its
/// signature verifies against the issuing process key and the issuing
/// ledger holds the same record under its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    id: CoinId,
    amount: Amount,
    source: CoinSource,
    #[serde(with = "hex_bytes")]
    signature: Vec<u8>,
    issued_at: Timestamp,
}

impl Coin {
    /// Coin identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issued amount.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Declared origin.
    pub fn source(&self) -> CoinSource {
        self.source
    }

    /// Issuance signature over [`Coin::message`].
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Issue time in milliseconds.
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    /// Bytes covered by the issuance signature.
    pub fn message(&self) -> Vec<u8> {
        coin_message(&self.id, &self.amount, self.source)
    }

    /// USD value at the given per-unit rate.
    pub fn value_usd(&self, rate: Amount) -> Amount {
        self.amount * rate
    }
}

fn coin_message(id: &str, amount: &Amount, source: CoinSource) -> Vec<u8> {
    format!("{}-{}-{}", id, canonical_amount(amount), source).into_bytes()
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SUPPLY
// =============================================================================

/// Snapshot of the ledger against the supply cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyStatus {
    /// Total units minted so far.
    pub current: Amount,
    /// Units still mintable.
    pub remaining: Amount,
    /// `current / cap * 100`.
    pub utilization_percent: Amount,
}

impl SupplyStatus {
    /// Build a status for `current` minted units against `cap`.
    pub fn from_minted(current: Amount, cap: Amount) -> Self {
        let utilization_percent = if cap.is_zero() {
            Decimal::ZERO
        } else {
            current / cap * Decimal::ONE_HUNDRED
        };
        Self {
            current,
            remaining: cap - current,
            utilization_percent,
        }
    }
}

//! Structured logging macros.
//!
//! Every entry carries a `subsystem` field so JSON output can be filtered
//! per component (ledger, verification, consensus, transactions).

/// Log an event with a `subsystem` field.
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a transfer event with a `tx_id` field.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $subsystem:expr, $msg:expr, $tx_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            tx_id = %$tx_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a coin event with `coin_id` and `amount` fields.
#[macro_export]
macro_rules! log_coin_event {
    ($level:ident, $subsystem:expr, $msg:expr, $coin_id:expr, $amount:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            coin_id = %$coin_id,
            amount = %$amount,
            $($($field)*,)?
            $msg
        )
    };
}

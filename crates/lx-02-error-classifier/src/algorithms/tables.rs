//! # Message Tables
//!
//! Static data only. New network codes are added here without touching
//! `classify`. `{asset}` is replaced with the asset display code.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Placeholder filled with the asset display code.
pub const ASSET_PLACEHOLDER: &str = "{asset}";

/// Result-code table. Keys are either `{operation_type}:{code}` or a bare code.
pub const RESULT_CODES: &[(&str, &str)] = &[
    // Transaction level
    ("tx_failed", "The transaction failed. One of its operations was rejected by the network."),
    ("tx_bad_seq", "Another transaction from this account was processed first. Please try again."),
    ("tx_bad_auth", "The transaction signature is invalid for this account."),
    ("tx_bad_auth_extra", "The transaction carries signatures that are not needed."),
    ("tx_insufficient_balance", "Your XLM balance cannot cover the network fee and reserve."),
    ("tx_no_source_account", "Your account does not exist on the network yet. Fund it with XLM first."),
    ("tx_insufficient_fee", "The network is busy and the fee was too low. Please try again."),
    ("tx_too_early", "The transaction was submitted before its valid time window."),
    ("tx_too_late", "The transaction expired before it reached the network. Please try again."),
    ("tx_missing_operation", "The transaction contains no operations."),
    ("tx_internal_error", "The network hit an internal error. Please try again later."),
    ("tx_not_supported", "This transaction type is not supported by the network."),
    ("try_again_later", "The network is busy. Please try again in a few moments."),
    // Composite, where the operation changes the meaning of a code
    (
        "payment:op_no_destination",
        "The destination account does not exist. Send at least the minimum starting balance of XLM to create it.",
    ),
    (
        "path_payment_strict_send:op_under_dest_min",
        "The price moved beyond your slippage tolerance. Try a higher slippage or a smaller amount.",
    ),
    (
        "path_payment_strict_receive:op_over_source_max",
        "Receiving this amount now costs more than your slippage tolerance allows. Try a higher slippage.",
    ),
    (
        "change_trust:op_low_reserve",
        "You need more XLM to cover the reserve for a new trustline.",
    ),
    (
        "create_account:op_low_reserve",
        "The starting balance is below the network minimum for a new account.",
    ),
];

/// Payment reasons.
pub const PAYMENT_REASONS: &[(&str, &str)] = &[
    ("op_underfunded", "You don't have enough {asset} to make this payment."),
    ("op_src_no_trust", "Your account has no trustline for {asset}."),
    ("op_src_not_authorized", "Your account is not authorized to send {asset}."),
    ("op_no_destination", "The destination account does not exist."),
    ("op_no_trust", "The recipient has no trustline for {asset}. Ask them to add it first."),
    ("op_not_authorized", "The recipient is not authorized to hold {asset}."),
    ("op_line_full", "The recipient cannot receive more {asset}; their trustline limit is reached."),
    ("op_no_issuer", "The issuer of {asset} does not exist."),
    ("op_malformed", "The payment is malformed. Check the amount and destination."),
];

/// Path payment reasons, shared by strict send and strict receive.
pub const PATH_PAYMENT_REASONS: &[(&str, &str)] = &[
    ("op_underfunded", "You don't have enough {asset} to complete this swap."),
    ("op_src_no_trust", "Your account has no trustline for {asset}."),
    ("op_src_not_authorized", "Your account is not authorized to send {asset}."),
    ("op_no_destination", "The destination account does not exist."),
    ("op_no_trust", "A trustline for {asset} is required to receive this swap."),
    ("op_not_authorized", "The receiving account is not authorized to hold {asset}."),
    ("op_line_full", "The receiving trustline for {asset} is full."),
    ("op_no_issuer", "The issuer of {asset} does not exist."),
    ("op_too_few_offers", "There is not enough liquidity to convert along this path. Try a smaller amount."),
    ("op_offer_cross_self", "This swap would trade against your own open offer."),
    ("op_over_source_max", "The swap would cost more than your maximum. The price moved; try again."),
    ("op_under_dest_min", "The swap would return less than your minimum. The price moved; try again."),
    ("op_malformed", "The swap is malformed. Check the assets and amounts."),
];

/// Change-trust reasons.
pub const CHANGE_TRUST_REASONS: &[(&str, &str)] = &[
    ("op_invalid_limit", "The trustline limit is below your current {asset} balance. Send or swap it away first."),
    ("op_low_reserve", "You need more XLM to cover the reserve for a trustline."),
    ("op_no_issuer", "The issuer of {asset} does not exist."),
    ("op_self_not_allowed", "An issuer cannot add a trustline to its own asset."),
    ("op_cannot_delete", "This trustline cannot be removed while it is still in use."),
    ("op_malformed", "The trustline request is malformed. Check the asset code and issuer."),
];

/// Create-account reasons.
pub const CREATE_ACCOUNT_REASONS: &[(&str, &str)] = &[
    ("op_underfunded", "You don't have enough XLM to fund the new account."),
    ("op_low_reserve", "The starting balance is below the network minimum for a new account."),
    ("op_already_exists", "The destination account already exists."),
    ("op_malformed", "The account creation request is malformed."),
];

/// Reasons shared by all operation types.
pub const COMMON_REASONS: &[(&str, &str)] = &[
    ("op_underfunded", "Your balance is too low for this operation."),
    ("op_low_reserve", "You need more XLM to cover the account reserve."),
    ("op_bad_auth", "The operation is not authorized by this account's signers."),
    ("op_no_source_account", "The source account does not exist."),
    ("op_not_supported", "This operation is not supported by the network."),
    ("op_too_many_subentries", "This account has reached the maximum number of trustlines and offers."),
    ("op_exceeded_work_limit", "The operation was too expensive for the network to process."),
    ("op_malformed", "The operation is malformed."),
];

/// Codes that describe a transient or sequence-conflict condition.
pub const RETRYABLE_CODES: &[&str] = &[
    "tx_bad_seq",
    "tx_too_late",
    "tx_insufficient_fee",
    "try_again_later",
];

lazy_static! {
    /// Result-code table, composite and bare keys together.
    pub static ref RESULT_CODE_TABLE: HashMap<&'static str, &'static str> =
        RESULT_CODES.iter().copied().collect();

    /// Payment reason table.
    pub static ref PAYMENT_TABLE: HashMap<&'static str, &'static str> =
        PAYMENT_REASONS.iter().copied().collect();

    /// Path payment reason table.
    pub static ref PATH_PAYMENT_TABLE: HashMap<&'static str, &'static str> =
        PATH_PAYMENT_REASONS.iter().copied().collect();

    /// Change-trust reason table.
    pub static ref CHANGE_TRUST_TABLE: HashMap<&'static str, &'static str> =
        CHANGE_TRUST_REASONS.iter().copied().collect();

    /// Create-account reason table.
    pub static ref CREATE_ACCOUNT_TABLE: HashMap<&'static str, &'static str> =
        CREATE_ACCOUNT_REASONS.iter().copied().collect();

    /// Common reason table.
    pub static ref COMMON_TABLE: HashMap<&'static str, &'static str> =
        COMMON_REASONS.iter().copied().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_tables() -> [&'static [(&'static str, &'static str)]; 6] {
        [
            RESULT_CODES,
            PAYMENT_REASONS,
            PATH_PAYMENT_REASONS,
            CHANGE_TRUST_REASONS,
            CREATE_ACCOUNT_REASONS,
            COMMON_REASONS,
        ]
    }

    #[test]
    fn test_no_duplicate_keys() {
        for table in all_tables() {
            let mut seen = HashSet::new();
            for (key, _) in table {
                assert!(seen.insert(*key), "duplicate key {key}");
            }
        }
    }

    #[test]
    fn test_no_empty_messages() {
        for table in all_tables() {
            for (key, message) in table {
                assert!(!message.trim().is_empty(), "empty message for {key}");
            }
        }
    }

    #[test]
    fn test_retryable_codes_have_messages() {
        for code in RETRYABLE_CODES {
            assert!(RESULT_CODE_TABLE.contains_key(code), "{code} has no message");
        }
    }
}

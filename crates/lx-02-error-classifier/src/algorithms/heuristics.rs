//! # Text Heuristics
//!
//! Best-effort secondary classifier for raw error text (network client
//! exceptions, transport errors). Substring matching on free text is
//! fragile: structured codes go through [`super::classify`] and this module
//! is only consulted when no code is available.

/// Lowercase needle to friendly message, first match wins.
const HEURISTICS: &[(&str, &str)] = &[
    ("insufficient balance", "Your balance is too low for this transaction."),
    ("underfunded", "Your balance is too low for this transaction."),
    ("no trustline", "A trustline for this asset is missing. Add the asset first."),
    ("trustline", "There is a problem with the trustline for this asset."),
    ("asset not found", "This asset could not be found on the network."),
    ("account not found", "The account could not be found on the network."),
    ("bad sequence", "Another transaction from this account was processed first. Please try again."),
    ("bad_seq", "Another transaction from this account was processed first. Please try again."),
    ("timed out", "The network did not respond in time. Check the transaction status before retrying."),
    ("timeout", "The network did not respond in time. Check the transaction status before retrying."),
    ("connection", "Could not reach the ledger network. Please try again later."),
];

/// Friendly message for raw error text, if any needle matches.
pub fn heuristic_message(raw: &str) -> Option<&'static str> {
    let lower = raw.to_lowercase();
    HEURISTICS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, message)| *message)
}

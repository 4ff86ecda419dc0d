//! # Classification
//!
//! Layered lookup over the static tables in [`super::tables`].

use super::tables::{
    ASSET_PLACEHOLDER, CHANGE_TRUST_TABLE, COMMON_TABLE, CREATE_ACCOUNT_TABLE, PATH_PAYMENT_TABLE,
    PAYMENT_TABLE, RESULT_CODE_TABLE, RETRYABLE_CODES,
};
use crate::domain::{Classification, FailureReport, MessageSource};
use shared_types::{Asset, OperationKind};
use std::collections::HashMap;

/// Used when a template needs an asset and none is known.
const UNKNOWN_ASSET: &str = "this asset";

/// Classify a failure report.
pub fn classify(report: &FailureReport) -> Classification {
    classify_with_asset(report, None)
}

/// Classify a failure report, using `context_asset` for `{asset}` when the
/// failure detail carries none.
pub fn classify_with_asset(report: &FailureReport, context_asset: Option<&Asset>) -> Classification {
    let failing = report.failing_operation();
    let code = failing
        .map(|op| op.code.as_str())
        .unwrap_or(report.transaction_code.as_str());
    let kind = failing.map(|op| &op.kind);

    let (template, source) = lookup(kind, code);

    let asset = failing
        .and_then(|op| op.detail.asset())
        .or(context_asset)
        .map(|a| a.code())
        .unwrap_or(UNKNOWN_ASSET);

    Classification {
        message: template.replace(ASSET_PLACEHOLDER, asset),
        transaction_code: report.transaction_code.clone(),
        operation_code: failing.map(|op| op.code.clone()),
        operation_kind: kind.cloned(),
        retryable: is_retryable_code(&report.transaction_code) || is_retryable_code(code),
        source,
    }
}

/// True for sequence conflicts and transient network conditions.
pub fn is_retryable_code(code: &str) -> bool {
    RETRYABLE_CODES.iter().any(|c| *c == code)
}

/// True for codes about what the source spends rather than what the
/// destination receives, so `{asset}` should name the sent asset.
pub fn concerns_sent_asset(code: &str) -> bool {
    code == "op_underfunded" || code == "op_over_source_max" || code.starts_with("op_src_")
}

/// `op_too_few_offers` becomes `op too few offers`.
pub fn humanize_code(code: &str) -> String {
    code.replace('_', " ")
}

fn lookup(kind: Option<&OperationKind>, code: &str) -> (String, MessageSource) {
    if let Some(kind) = kind {
        let composite = format!("{}:{}", kind, code);
        if let Some(message) = RESULT_CODE_TABLE.get(composite.as_str()) {
            return (message.to_string(), MessageSource::CompositeCode);
        }
    }

    if let Some(message) = RESULT_CODE_TABLE.get(code) {
        return (message.to_string(), MessageSource::ResultCode);
    }

    if let Some(table) = kind.and_then(reason_table) {
        if let Some(message) = table.get(code) {
            return (message.to_string(), MessageSource::OperationReason);
        }
    }

    if let Some(message) = COMMON_TABLE.get(code) {
        return (message.to_string(), MessageSource::CommonReason);
    }

    (
        format!("Transaction failed: {}", humanize_code(code)),
        MessageSource::Fallback,
    )
}

fn reason_table(kind: &OperationKind) -> Option<&'static HashMap<&'static str, &'static str>> {
    match kind {
        OperationKind::Payment => Some(&*PAYMENT_TABLE),
        OperationKind::PathPaymentStrictSend | OperationKind::PathPaymentStrictReceive => {
            Some(&*PATH_PAYMENT_TABLE)
        }
        OperationKind::ChangeTrust => Some(&*CHANGE_TRUST_TABLE),
        OperationKind::CreateAccount => Some(&*CREATE_ACCOUNT_TABLE),
        OperationKind::Other(_) => None,
    }
}

//! # Orchestration Entities
//!
//! ## Clusters
//!
//! - **Requests**: raw caller input and the validated intents parsed from it
//! - **Previews**: per-operation detail payloads
//! - **Responses**: `ApiResponse<T>` envelope and `ResponseStatus`
//! - **Side effects**: history records and withdrawal notifications

use super::config::PolicyConfig;
use super::errors::OrchestrationError;
use super::value_objects::{Pin, Slippage};
use lx_03_confirmation::ConfirmationToken;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, Asset, Memo, TransactionHash};

// =============================================================================
// CLUSTER A: REQUESTS AND INTENTS
// =============================================================================

/// Off-ledger payout details attached to an anchor withdrawal.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatWithdrawal {
    /// Bank account number.
    pub bank_account_number: String,
    /// Account holder name.
    pub account_name: String,
    /// Bank or institution name.
    pub institution: String,
}

impl std::fmt::Debug for FiatWithdrawal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits: Vec<char> = self.bank_account_number.chars().collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        f.debug_struct("FiatWithdrawal")
            .field("bank_account_number", &format!("***{}", tail))
            .field("account_name", &self.account_name)
            .field("institution", &self.institution)
            .finish()
    }
}

/// Raw payment input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Paying account id.
    pub source: String,
    /// Receiving account id.
    pub destination: String,
    /// `XLM` or `CODE:ISSUER`.
    pub asset: String,
    /// Decimal amount.
    pub amount: String,
    /// Optional text memo.
    #[serde(default)]
    pub memo: Option<String>,
    /// Present for anchor withdrawals.
    #[serde(default)]
    pub withdrawal: Option<FiatWithdrawal>,
}

/// Validated payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Paying account.
    pub source: AccountId,
    /// Receiving account.
    pub destination: AccountId,
    /// Asset sent.
    pub asset: Asset,
    /// Amount sent.
    pub amount: Amount,
    /// Memo.
    pub memo: Memo,
    /// Anchor withdrawal details.
    pub withdrawal: Option<FiatWithdrawal>,
}

impl PaymentRequest {
    /// Static validation. No network access.
    pub fn parse(&self, policy: &PolicyConfig) -> Result<PaymentIntent, OrchestrationError> {
        let source = AccountId::parse(&self.source)?;
        let destination = AccountId::parse(&self.destination)?;
        if source == destination {
            return Err(OrchestrationError::InvalidInput(
                "Cannot send a payment to the same account".to_string(),
            ));
        }
        let asset = Asset::parse(&self.asset)?;
        let amount = parse_positive_amount(&self.amount)?;
        policy.minimum_send.check(asset.code(), amount)?;
        let memo = Memo::from_optional(self.memo.as_deref())?;

        Ok(PaymentIntent {
            source,
            destination,
            asset,
            amount,
            memo,
            withdrawal: self.withdrawal.clone(),
        })
    }
}

/// Which side of a conversion is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Strict-send to the source account itself.
    Swap,
    /// Source amount fixed, destination bounded below.
    StrictSend,
    /// Destination amount fixed, source bounded above.
    StrictReceive,
}

impl ConversionMode {
    /// Operation name for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Swap => "swap",
            ConversionMode::StrictSend => "strict_send",
            ConversionMode::StrictReceive => "strict_receive",
        }
    }
}

/// Raw conversion input.
///
/// `amount` is the send amount for swaps and strict-send, the receive amount
/// for strict-receive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    /// Paying account id.
    pub source: String,
    /// Receiving account id. Ignored for swaps.
    #[serde(default)]
    pub destination: Option<String>,
    /// Asset debited.
    pub send_asset: String,
    /// Asset credited.
    pub dest_asset: String,
    /// Fixed amount.
    pub amount: String,
    /// Slippage tolerance in percent.
    pub slippage_percent: f64,
}

/// Validated conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIntent {
    /// Fixed side.
    pub mode: ConversionMode,
    /// Paying account.
    pub source: AccountId,
    /// Receiving account (the source for swaps).
    pub destination: AccountId,
    /// Asset debited.
    pub send_asset: Asset,
    /// Asset credited.
    pub dest_asset: Asset,
    /// Fixed amount.
    pub amount: Amount,
    /// Tolerance.
    pub slippage: Slippage,
}

impl PathRequest {
    /// Static validation. No network access.
    pub fn parse(
        &self,
        mode: ConversionMode,
        policy: &PolicyConfig,
    ) -> Result<PathIntent, OrchestrationError> {
        let source = AccountId::parse(&self.source)?;
        let destination = match (mode, self.destination.as_deref()) {
            (ConversionMode::Swap, _) => source.clone(),
            (_, Some(destination)) => AccountId::parse(destination)?,
            (_, None) => {
                return Err(OrchestrationError::InvalidInput(
                    "A destination account is required".to_string(),
                ))
            }
        };
        let send_asset = Asset::parse(&self.send_asset)?;
        let dest_asset = Asset::parse(&self.dest_asset)?;
        if send_asset == dest_asset {
            return Err(OrchestrationError::SameAsset);
        }
        let amount = parse_positive_amount(&self.amount)?;
        let fixed_asset = match mode {
            ConversionMode::StrictReceive => &dest_asset,
            ConversionMode::Swap | ConversionMode::StrictSend => &send_asset,
        };
        policy.minimum_send.check(fixed_asset.code(), amount)?;

        if !(self.slippage_percent >= 0.0 && self.slippage_percent < policy.max_slippage_percent) {
            return Err(OrchestrationError::SlippageOutOfRange {
                max: policy.max_slippage_percent,
            });
        }
        let slippage = Slippage::from_percent(self.slippage_percent)?;

        Ok(PathIntent {
            mode,
            source,
            destination,
            send_asset,
            dest_asset,
            amount,
            slippage,
        })
    }
}

/// Confirmed payment execution.
#[derive(Debug, Clone)]
pub struct ExecutePaymentCommand {
    /// Same input as the preview.
    pub request: PaymentRequest,
    /// Transaction PIN.
    pub pin: Pin,
    /// Token returned by the preview.
    pub confirmation_token: String,
}

/// Confirmed conversion execution.
#[derive(Debug, Clone)]
pub struct ExecuteConversionCommand {
    /// Same input as the preview.
    pub request: PathRequest,
    /// Transaction PIN.
    pub pin: Pin,
}

/// Trustline addition or removal.
#[derive(Debug, Clone)]
pub struct TrustlineCommand {
    /// Account that holds the trustline.
    pub account: String,
    /// `CODE:ISSUER`.
    pub asset: String,
    /// Transaction PIN.
    pub pin: Pin,
}

/// Creation and funding of a new account.
#[derive(Debug, Clone)]
pub struct FundAccountCommand {
    /// Funding account id.
    pub source: String,
    /// Account id to create.
    pub destination: String,
    /// Starting native balance.
    pub starting_balance: String,
    /// Transaction PIN.
    pub pin: Pin,
}

impl TrustlineCommand {
    /// Account and credit asset. Native XLM cannot carry a trustline.
    pub fn parse(&self) -> Result<(AccountId, Asset), OrchestrationError> {
        let account = AccountId::parse(&self.account)?;
        let asset = Asset::parse(&self.asset)?;
        if asset.is_native() {
            return Err(OrchestrationError::NativeTrustline);
        }
        Ok((account, asset))
    }
}

impl FundAccountCommand {
    /// Source, new account and starting balance.
    pub fn parse(&self) -> Result<(AccountId, AccountId, Amount), OrchestrationError> {
        let source = AccountId::parse(&self.source)?;
        let destination = AccountId::parse(&self.destination)?;
        if source == destination {
            return Err(OrchestrationError::InvalidInput(
                "An account cannot fund itself".to_string(),
            ));
        }
        let starting_balance = parse_positive_amount(&self.starting_balance)?;
        Ok((source, destination, starting_balance))
    }
}

fn parse_positive_amount(input: &str) -> Result<Amount, OrchestrationError> {
    let amount = Amount::parse(input)?;
    if !amount.is_positive() {
        return Err(OrchestrationError::AmountNotPositive);
    }
    Ok(amount)
}

// =============================================================================
// CLUSTER B: PREVIEWS
// =============================================================================

/// Plain payment quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Paying account.
    pub source: AccountId,
    /// Receiving account.
    pub destination: AccountId,
    /// Asset sent.
    pub asset: Asset,
    /// Amount the destination receives.
    pub amount: Amount,
    /// Network fee in XLM.
    pub fee: Amount,
    /// Amount plus fee for native payments, amount for credit assets.
    pub total_debit: Amount,
    /// Memo text, if any.
    pub memo: Option<String>,
    /// True if the payment funds a new account.
    pub creates_account: bool,
}

/// Payment preview payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPreview {
    /// Quoted payment.
    pub payment_details: PaymentDetails,
    /// Token to present at execute.
    pub confirmation_token: ConfirmationToken,
}

/// Swap quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapDetails {
    /// Asset given up.
    pub send_asset: Asset,
    /// Fixed amount given up.
    pub send_amount: Amount,
    /// Asset acquired.
    pub dest_asset: Asset,
    /// Quoted amount acquired.
    pub estimated_receive: Amount,
    /// Floor after slippage.
    pub minimum_receive: Amount,
    /// Tolerance applied.
    pub slippage_percent: f64,
    /// Destination units per source unit at the quoted amounts.
    pub exchange_rate: f64,
    /// Rate loss against a one-unit quote, never negative.
    pub price_impact_percent: f64,
    /// Source, intermediate hops and destination, consecutive repeats removed.
    pub route: Vec<Asset>,
    /// Network fee in XLM.
    pub fee: Amount,
}

/// Swap preview payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapPreview {
    /// Quoted swap.
    pub swap_details: SwapDetails,
}

/// Strict-send quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictSendDetails {
    /// Paying account.
    pub source: AccountId,
    /// Receiving account.
    pub destination: AccountId,
    /// Asset debited.
    pub send_asset: Asset,
    /// Fixed amount debited.
    pub send_amount: Amount,
    /// Asset credited.
    pub dest_asset: Asset,
    /// Quoted amount credited.
    pub estimated_receive: Amount,
    /// Floor after slippage.
    pub minimum_receive: Amount,
    /// Tolerance applied.
    pub slippage_percent: f64,
    /// Intermediate hops.
    pub path: Vec<Asset>,
    /// Network fee in XLM.
    pub fee: Amount,
}

/// Strict-send preview payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictSendPreview {
    /// Quoted conversion.
    pub strict_send_details: StrictSendDetails,
}

/// Strict-receive quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictReceiveDetails {
    /// Paying account.
    pub source: AccountId,
    /// Receiving account.
    pub destination: AccountId,
    /// Asset debited.
    pub send_asset: Asset,
    /// Quoted amount debited.
    pub estimated_send: Amount,
    /// Ceiling after slippage.
    pub maximum_send: Amount,
    /// Asset credited.
    pub dest_asset: Asset,
    /// Fixed amount credited.
    pub dest_amount: Amount,
    /// Tolerance applied.
    pub slippage_percent: f64,
    /// Intermediate hops.
    pub path: Vec<Asset>,
    /// Network fee in XLM.
    pub fee: Amount,
}

/// Strict-receive preview payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictReceivePreview {
    /// Quoted conversion.
    pub strict_receive_details: StrictReceiveDetails,
}

/// Execute payload: the hash when one exists, otherwise empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// Transaction hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<TransactionHash>,
}

// =============================================================================
// CLUSTER C: RESPONSES
// =============================================================================

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    /// Completed.
    Ok,
    /// Submitted, outcome not yet known.
    Accepted,
    /// Rejected input, pre-flight or ledger failure.
    BadRequest,
    /// PIN check failed.
    Unauthorized,
    /// Collaborator or ledger client failure.
    InternalServerError,
}

impl ResponseStatus {
    /// Wire name, e.g. `BAD_REQUEST`.
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseStatus::Ok => "OK",
            ResponseStatus::Accepted => "ACCEPTED",
            ResponseStatus::BadRequest => "BAD_REQUEST",
            ResponseStatus::Unauthorized => "UNAUTHORIZED",
            ResponseStatus::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Equivalent HTTP status code.
    pub fn http_code(self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Accepted => 202,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::Unauthorized => 401,
            ResponseStatus::InternalServerError => 500,
        }
    }
}

/// Uniform response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload.
    pub data: Option<T>,
    /// Outcome class.
    pub status: ResponseStatus,
    /// User-facing message.
    pub message: Option<String>,
    /// True only for `OK`.
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// `OK` with a payload.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            status: ResponseStatus::Ok,
            message: None,
            success: true,
        }
    }

    /// `OK` with a payload and message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// `ACCEPTED`: submitted, not confirmed.
    pub fn accepted(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            status: ResponseStatus::Accepted,
            message: Some(message.into()),
            success: false,
        }
    }

    /// Failure with an explicit status.
    pub fn failure(status: ResponseStatus, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            data,
            status,
            message: Some(message.into()),
            success: false,
        }
    }

    /// Failure from an orchestration error.
    pub fn from_error(error: &OrchestrationError) -> Self {
        Self::failure(error.status(), error.user_message(), None)
    }
}

// =============================================================================
// CLUSTER D: SIDE EFFECTS
// =============================================================================

/// What a confirmed transaction did, for the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryDetail {
    /// Plain payment.
    Payment {
        /// Receiving account
        destination: AccountId,
        /// Asset sent
        asset: Asset,
        /// Amount sent
        amount: Amount,
        /// Fee paid
        fee: Amount,
        /// Memo text
        memo: Option<String>,
        /// Anchor payout details
        withdrawal: Option<FiatWithdrawal>,
    },
    /// Conversion to self.
    Swap {
        /// Asset given up
        send_asset: Asset,
        /// Amount given up
        send_amount: Amount,
        /// Asset acquired
        dest_asset: Asset,
        /// Guaranteed floor
        minimum_receive: Amount,
    },
    /// Strict-send conversion.
    StrictSend {
        /// Receiving account
        destination: AccountId,
        /// Asset debited
        send_asset: Asset,
        /// Amount debited
        send_amount: Amount,
        /// Asset credited
        dest_asset: Asset,
        /// Guaranteed floor
        minimum_receive: Amount,
    },
    /// Strict-receive conversion.
    StrictReceive {
        /// Receiving account
        destination: AccountId,
        /// Asset debited
        send_asset: Asset,
        /// Debit ceiling
        maximum_send: Amount,
        /// Asset credited
        dest_asset: Asset,
        /// Amount credited
        dest_amount: Amount,
    },
    /// Trustline opened.
    TrustlineAdded {
        /// Trusted asset
        asset: Asset,
    },
    /// Trustline closed.
    TrustlineRemoved {
        /// Formerly trusted asset
        asset: Asset,
    },
    /// New account created.
    AccountFunded {
        /// Created account
        destination: AccountId,
        /// Native balance it started with
        starting_balance: Amount,
    },
}

/// Row appended to the user's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Account the row belongs to.
    pub user: AccountId,
    /// What happened.
    pub detail: HistoryDetail,
    /// Confirmed transaction.
    pub tx_hash: TransactionHash,
}

/// Event sent after a confirmed payment or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalConfirmed {
    /// Paying account.
    pub user: AccountId,
    /// Receiving account.
    pub destination: AccountId,
    /// Asset sent.
    pub asset: Asset,
    /// Amount sent.
    pub amount: Amount,
    /// Confirmed transaction.
    pub tx_hash: TransactionHash,
    /// Anchor payout details.
    pub withdrawal: Option<FiatWithdrawal>,
}

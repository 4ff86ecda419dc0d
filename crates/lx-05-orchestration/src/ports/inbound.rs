//! # Inbound Port

use crate::domain::{
    ApiResponse, ExecuteConversionCommand, ExecutePaymentCommand, ExecutionReceipt,
    FundAccountCommand, PathRequest, PaymentPreview, PaymentRequest, StrictReceivePreview,
    StrictSendPreview, SwapPreview, TrustlineCommand,
};
use async_trait::async_trait;

/// Orchestration API.
///
/// Every call returns an envelope; nothing here returns `Err`. Previews
/// never touch the ledger. Executes validate the PIN, and for payments the
/// confirmation token, before the first network call.
#[async_trait]
pub trait OrchestrationApi: Send + Sync {
    /// Quote a payment and issue its confirmation token.
    async fn preview_payment(&self, request: PaymentRequest) -> ApiResponse<PaymentPreview>;

    /// Execute a previewed payment.
    async fn execute_payment(&self, command: ExecutePaymentCommand) -> ApiResponse<ExecutionReceipt>;

    /// Quote a swap between two assets of the same account.
    async fn preview_swap(&self, request: PathRequest) -> ApiResponse<SwapPreview>;

    /// Execute a swap.
    async fn execute_swap(&self, command: ExecuteConversionCommand) -> ApiResponse<ExecutionReceipt>;

    /// Quote a strict-send path payment.
    async fn preview_strict_send(&self, request: PathRequest) -> ApiResponse<StrictSendPreview>;

    /// Execute a strict-send path payment.
    async fn execute_strict_send(
        &self,
        command: ExecuteConversionCommand,
    ) -> ApiResponse<ExecutionReceipt>;

    /// Quote a strict-receive path payment.
    async fn preview_strict_receive(&self, request: PathRequest)
        -> ApiResponse<StrictReceivePreview>;

    /// Execute a strict-receive path payment.
    async fn execute_strict_receive(
        &self,
        command: ExecuteConversionCommand,
    ) -> ApiResponse<ExecutionReceipt>;

    /// Open a trustline with the maximum limit.
    async fn add_trustline(&self, command: TrustlineCommand) -> ApiResponse<ExecutionReceipt>;

    /// Close an empty trustline.
    async fn remove_trustline(&self, command: TrustlineCommand) -> ApiResponse<ExecutionReceipt>;

    /// Create and fund a new account.
    async fn fund_account(&self, command: FundAccountCommand) -> ApiResponse<ExecutionReceipt>;
}

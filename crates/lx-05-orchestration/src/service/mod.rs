//! # Orchestration Service
//!
//! Implements `OrchestrationApi` over injected ports.
//!
//! ## Flow
//!
//! Every execute follows the same order:
//! 1. Static validation of the raw request
//! 2. PIN authorization through the identity provider
//! 3. Confirmation token check (plain payments)
//! 4. Fresh account snapshot, base reserve and path quotes
//! 5. Pre-flight balance checks
//! 6. Executor run, then history and notification on success

mod conversion;
mod helpers;
mod payment;
#[cfg(test)]
mod tests;
mod trustline;

use crate::domain::{
    ApiResponse, ConversionMode, ExecuteConversionCommand, ExecutePaymentCommand,
    ExecutionReceipt, FundAccountCommand, OrchestrationError, OrchestratorConfig, PathRequest,
    PaymentPreview, PaymentRequest, StrictReceivePreview, StrictSendPreview, SwapPreview,
    TrustlineCommand,
};
use crate::ports::{
    AccountLoader, HistoryStore, IdentityProvider, NotificationDispatcher, OrchestrationApi,
    PathFinder,
};
use async_trait::async_trait;
use helpers::{respond_execution, respond_preview};
use lx_03_confirmation::{spawn_sweeper, ConfirmationTokenApi};
use lx_04_executor::{TransactionExecutor, TransactionExecutorApi, TransactionSubmitter};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Dependencies for `OrchestrationService`.
pub struct OrchestrationDependencies {
    /// Account snapshots and base reserve.
    pub accounts: Arc<dyn AccountLoader>,
    /// Conversion quotes.
    pub paths: Arc<dyn PathFinder>,
    /// Signing, submission and status polling.
    pub submitter: Arc<dyn TransactionSubmitter>,
    /// Confirmation token store.
    pub tokens: Arc<dyn ConfirmationTokenApi>,
    /// PIN check and key custody.
    pub identity: Arc<dyn IdentityProvider>,
    /// Transaction history.
    pub history: Arc<dyn HistoryStore>,
    /// User notifications.
    pub notifier: Arc<dyn NotificationDispatcher>,
}

/// The orchestration service.
pub struct OrchestrationService {
    pub(crate) accounts: Arc<dyn AccountLoader>,
    pub(crate) paths: Arc<dyn PathFinder>,
    pub(crate) executor: Arc<dyn TransactionExecutorApi>,
    pub(crate) tokens: Arc<dyn ConfirmationTokenApi>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) history: Arc<dyn HistoryStore>,
    pub(crate) notifier: Arc<dyn NotificationDispatcher>,
    pub(crate) config: OrchestratorConfig,
}

impl OrchestrationService {
    /// Validate `config` and wire the executor over `deps.submitter`.
    pub fn new(
        deps: OrchestrationDependencies,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestrationError> {
        config.validate()?;
        let executor = TransactionExecutor::new(deps.submitter, config.executor.clone());
        Ok(Self {
            accounts: deps.accounts,
            paths: deps.paths,
            executor: Arc::new(executor),
            tokens: deps.tokens,
            identity: deps.identity,
            history: deps.history,
            notifier: deps.notifier,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Start the periodic sweep of expired confirmation tokens.
    pub fn spawn_token_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(self.tokens.clone(), self.config.confirmation.sweep_interval)
    }
}

#[async_trait]
impl OrchestrationApi for OrchestrationService {
    async fn preview_payment(&self, request: PaymentRequest) -> ApiResponse<PaymentPreview> {
        respond_preview("payment", self.preview_payment_inner(request).await)
    }

    async fn execute_payment(&self, command: ExecutePaymentCommand) -> ApiResponse<ExecutionReceipt> {
        respond_execution("payment", self.execute_payment_inner(command).await)
    }

    async fn preview_swap(&self, request: PathRequest) -> ApiResponse<SwapPreview> {
        respond_preview("swap", self.preview_swap_inner(request).await)
    }

    async fn execute_swap(&self, command: ExecuteConversionCommand) -> ApiResponse<ExecutionReceipt> {
        respond_execution(
            "swap",
            self.execute_conversion_inner(ConversionMode::Swap, command).await,
        )
    }

    async fn preview_strict_send(&self, request: PathRequest) -> ApiResponse<StrictSendPreview> {
        respond_preview("strict_send", self.preview_strict_send_inner(request).await)
    }

    async fn execute_strict_send(
        &self,
        command: ExecuteConversionCommand,
    ) -> ApiResponse<ExecutionReceipt> {
        respond_execution(
            "strict_send",
            self.execute_conversion_inner(ConversionMode::StrictSend, command)
                .await,
        )
    }

    async fn preview_strict_receive(
        &self,
        request: PathRequest,
    ) -> ApiResponse<StrictReceivePreview> {
        respond_preview(
            "strict_receive",
            self.preview_strict_receive_inner(request).await,
        )
    }

    async fn execute_strict_receive(
        &self,
        command: ExecuteConversionCommand,
    ) -> ApiResponse<ExecutionReceipt> {
        respond_execution(
            "strict_receive",
            self.execute_conversion_inner(ConversionMode::StrictReceive, command)
                .await,
        )
    }

    async fn add_trustline(&self, command: TrustlineCommand) -> ApiResponse<ExecutionReceipt> {
        respond_execution("add_trustline", self.add_trustline_inner(command).await)
    }

    async fn remove_trustline(&self, command: TrustlineCommand) -> ApiResponse<ExecutionReceipt> {
        respond_execution("remove_trustline", self.remove_trustline_inner(command).await)
    }

    async fn fund_account(&self, command: FundAccountCommand) -> ApiResponse<ExecutionReceipt> {
        respond_execution("fund_account", self.fund_account_inner(command).await)
    }
}

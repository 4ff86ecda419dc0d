//! # Orchestration Service - Trustlines and Account Funding
//!
//! Each trustline adds one base reserve to the account minimum, so adding
//! one needs `base_reserve + fee` spendable XLM. Removing one needs the fee
//! only and releases the reserve.

use super::helpers::{ensure_covers, ensure_starting_balance};
use super::OrchestrationService;
use crate::domain::{FundAccountCommand, HistoryDetail, OrchestrationError, TrustlineCommand};
use lx_01_reserve::ensure_spendable;
use lx_04_executor::TransactionOutcome;
use shared_types::{Amount, Asset, Memo, Operation};
use tracing::{info, instrument};

impl OrchestrationService {
    #[instrument(skip_all, fields(operation = "add_trustline"))]
    pub(crate) async fn add_trustline_inner(
        &self,
        command: TrustlineCommand,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        let (account_id, asset) = command.parse()?;
        let key = self.authorize(&account_id, &command.pin).await?;

        let account = self.load_source(&account_id).await?;
        if account.has_trustline(&asset) {
            return Err(OrchestrationError::TrustlineExists {
                asset: asset.code().to_string(),
            });
        }
        let base_reserve = self.base_reserve().await?;
        let fee = self.fee_for(1)?;
        let required = base_reserve.checked_add(fee)?;
        ensure_spendable(&account, &Asset::Native, base_reserve, Amount::ZERO, required)?;

        info!(
            account = %account_id.short(),
            asset = %asset.canonical(),
            "[lx-05] Adding trustline"
        );
        let operation = Operation::ChangeTrust {
            asset: asset.clone(),
            limit: None,
        };
        let outcome = self.submit(account, vec![operation], Memo::None, &key).await;
        self.after_success(
            &outcome,
            &account_id,
            HistoryDetail::TrustlineAdded { asset },
            None,
        )
        .await;
        Ok(outcome)
    }

    #[instrument(skip_all, fields(operation = "remove_trustline"))]
    pub(crate) async fn remove_trustline_inner(
        &self,
        command: TrustlineCommand,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        let (account_id, asset) = command.parse()?;
        let key = self.authorize(&account_id, &command.pin).await?;

        let account = self.load_source(&account_id).await?;
        let balance = account
            .balance_of(&asset)
            .ok_or_else(|| OrchestrationError::NoTrustline {
                asset: asset.code().to_string(),
            })?;
        if !balance.is_zero() {
            return Err(OrchestrationError::TrustlineNotEmpty {
                asset: asset.code().to_string(),
                balance,
            });
        }
        let base_reserve = self.base_reserve().await?;
        let fee = self.fee_for(1)?;
        ensure_spendable(&account, &Asset::Native, base_reserve, Amount::ZERO, fee)?;

        info!(
            account = %account_id.short(),
            asset = %asset.canonical(),
            "[lx-05] Removing trustline"
        );
        let operation = Operation::ChangeTrust {
            asset: asset.clone(),
            limit: Some(Amount::ZERO),
        };
        let outcome = self.submit(account, vec![operation], Memo::None, &key).await;
        self.after_success(
            &outcome,
            &account_id,
            HistoryDetail::TrustlineRemoved { asset },
            None,
        )
        .await;
        Ok(outcome)
    }

    #[instrument(skip_all, fields(operation = "fund_account"))]
    pub(crate) async fn fund_account_inner(
        &self,
        command: FundAccountCommand,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        let (source, destination, starting_balance) = command.parse()?;
        let key = self.authorize(&source, &command.pin).await?;

        let account = self.load_source(&source).await?;
        if self.load_optional(&destination).await?.is_some() {
            return Err(OrchestrationError::DestinationExists {
                destination: destination.to_string(),
            });
        }
        let base_reserve = self.base_reserve().await?;
        ensure_starting_balance(starting_balance, base_reserve)?;
        let fee = self.fee_for(1)?;
        ensure_covers(&account, &Asset::Native, base_reserve, starting_balance, fee)?;

        info!(
            source = %source.short(),
            destination = %destination.short(),
            starting_balance = %starting_balance,
            "[lx-05] Funding new account"
        );
        let operation = Operation::CreateAccount {
            destination: destination.clone(),
            starting_balance,
        };
        let outcome = self.submit(account, vec![operation], Memo::None, &key).await;
        self.after_success(
            &outcome,
            &source,
            HistoryDetail::AccountFunded {
                destination,
                starting_balance,
            },
            None,
        )
        .await;
        Ok(outcome)
    }
}

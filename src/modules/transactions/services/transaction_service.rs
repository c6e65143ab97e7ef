use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::db::with_timeout;
use crate::core::{money, AppError, Result};
use crate::modules::catalog::models::CatalogItem;
use crate::modules::catalog::repositories::catalog_repository::CatalogRepository;
use crate::modules::transactions::models::{
    CreateTransactionRequest, NewTransaction, NewTransactionLine, Transaction,
    TransactionFilter, TransactionStatus, UpdateTransactionRequest,
};
use crate::modules::transactions::repositories::transaction_repository::TransactionRepository;
use crate::modules::transactions::services::pricing::PricingCalculator;
use crate::modules::transactions::services::tax_engine::{TaxEngine, TaxFlags};

/// Service owning the transaction lifecycle: create, read, patch, delete.
///
/// All monetary fields are computed here, at write time, through the
/// pricing calculator and the tax engine; reads return stored snapshots.
pub struct TransactionService {
    repository: Arc<TransactionRepository>,
    catalog_repository: Arc<CatalogRepository>,
    pricing: PricingCalculator,
    tax_engine: TaxEngine,
    query_timeout: Duration,
}

impl TransactionService {
    pub fn new(
        repository: Arc<TransactionRepository>,
        catalog_repository: Arc<CatalogRepository>,
        tax_engine: TaxEngine,
        query_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            catalog_repository,
            pricing: PricingCalculator::new(),
            tax_engine,
            query_timeout,
        }
    }

    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        request.validate()?;

        let catalog = self.load_referenced_items(&request).await?;

        let pricing = self.pricing.price(&request.items);
        let breakdown = self.tax_engine.assess(
            pricing.subtotal,
            TaxFlags {
                ppn: request.ppn_enabled,
                regional: request.regional_tax_enabled,
                pph22: request.pph22_enabled,
                pph23: request.pph23_enabled,
            },
        );

        let mut lines = Vec::with_capacity(pricing.lines.len());
        for line in pricing.lines {
            let item = catalog.get(&line.item_id).ok_or_else(|| {
                AppError::internal(format!("Item {} missing from catalog snapshot", line.item_id))
            })?;
            lines.push(NewTransactionLine {
                item_id: line.item_id,
                item_code: item.code.clone(),
                item_name: item.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                discount_percent: line.discount_percent,
                line_total: line.line_total,
            });
        }

        let transaction_date = request.transaction_date.unwrap_or_else(Utc::now);

        let new = NewTransaction {
            transaction_number: Self::generate_transaction_number(transaction_date),
            customer_name: request.customer_name,
            customer_address: request.customer_address,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            status: TransactionStatus::Draft,
            subtotal: pricing.subtotal,
            ppn_enabled: request.ppn_enabled,
            ppn_amount: breakdown.ppn_amount,
            regional_tax_enabled: request.regional_tax_enabled,
            regional_tax_amount: breakdown.regional_tax_amount,
            pph22_enabled: request.pph22_enabled,
            pph22_amount: breakdown.pph22_amount,
            pph23_enabled: request.pph23_enabled,
            pph23_amount: breakdown.pph23_amount,
            stamp_duty_required: breakdown.stamp_duty_required,
            stamp_duty_amount: breakdown.stamp_duty_amount,
            total_amount: breakdown.total_amount,
            notes: request.notes,
            transaction_date,
            lines,
        };

        let transaction = with_timeout(self.query_timeout, self.repository.create(&new)).await?;

        tracing::info!(
            transaction_id = transaction.id,
            transaction_number = %transaction.transaction_number,
            total = %transaction.total_amount,
            "Transaction created"
        );
        Ok(transaction)
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        with_timeout(self.query_timeout, self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction {} not found", id)))
    }

    pub async fn history(&self, mut filter: TransactionFilter) -> Result<Vec<Transaction>> {
        filter.limit = filter.limit.clamp(1, 100);
        filter.offset = filter.offset.max(0);

        with_timeout(self.query_timeout, self.repository.history(&filter)).await
    }

    /// Apply a patch: scalar fields are replaced when present, and a change
    /// to any tax flag recomputes every tax amount from the stored lines.
    pub async fn update_transaction(
        &self,
        id: i64,
        patch: UpdateTransactionRequest,
    ) -> Result<Transaction> {
        patch.validate()?;

        let mut transaction = self.get_transaction(id).await?;

        if let Some(next) = patch.status {
            if !transaction.status.can_transition_to(next) {
                return Err(AppError::precondition(format!(
                    "Cannot change status from {} to {}",
                    transaction.status, next
                )));
            }
            transaction.status = next;
        }

        let touches_tax_flags = patch.touches_tax_flags();

        if let Some(name) = patch.customer_name {
            transaction.customer_name = name;
        }
        if let Some(address) = patch.customer_address {
            transaction.customer_address = Some(address);
        }
        if let Some(phone) = patch.customer_phone {
            transaction.customer_phone = Some(phone);
        }
        if let Some(email) = patch.customer_email {
            transaction.customer_email = Some(email);
        }
        if let Some(notes) = patch.notes {
            transaction.notes = Some(notes);
        }
        if let Some(date) = patch.transaction_date {
            transaction.transaction_date = date;
        }

        if touches_tax_flags {
            transaction.ppn_enabled = patch.ppn_enabled.unwrap_or(transaction.ppn_enabled);
            transaction.regional_tax_enabled = patch
                .regional_tax_enabled
                .unwrap_or(transaction.regional_tax_enabled);
            transaction.pph22_enabled = patch.pph22_enabled.unwrap_or(transaction.pph22_enabled);
            transaction.pph23_enabled = patch.pph23_enabled.unwrap_or(transaction.pph23_enabled);

            // The stored amounts are stale now; rebuild them from the lines.
            let subtotal = money::round(
                transaction
                    .items
                    .iter()
                    .map(|line| line.line_total)
                    .sum(),
            );
            let breakdown = self.tax_engine.assess(
                subtotal,
                TaxFlags {
                    ppn: transaction.ppn_enabled,
                    regional: transaction.regional_tax_enabled,
                    pph22: transaction.pph22_enabled,
                    pph23: transaction.pph23_enabled,
                },
            );

            transaction.subtotal = subtotal;
            transaction.ppn_amount = breakdown.ppn_amount;
            transaction.regional_tax_amount = breakdown.regional_tax_amount;
            transaction.pph22_amount = breakdown.pph22_amount;
            transaction.pph23_amount = breakdown.pph23_amount;
            transaction.stamp_duty_required = breakdown.stamp_duty_required;
            transaction.stamp_duty_amount = breakdown.stamp_duty_amount;
            transaction.total_amount = breakdown.total_amount;
        }

        let updated =
            with_timeout(self.query_timeout, self.repository.update(&transaction)).await?;

        tracing::info!(
            transaction_id = updated.id,
            status = %updated.status,
            "Transaction updated"
        );
        Ok(updated)
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        let deleted =
            with_timeout(self.query_timeout, self.repository.delete_draft(id)).await?;
        if deleted {
            tracing::info!(transaction_id = id, "Transaction deleted");
            return Ok(());
        }

        // Nothing was removed: either the id is unknown or the status
        // forbids deletion.
        match with_timeout(self.query_timeout, self.repository.find_status(id)).await? {
            None => Err(AppError::not_found(format!("Transaction {} not found", id))),
            Some(status) => Err(AppError::precondition(format!(
                "Only draft transactions can be deleted (current status: {})",
                status
            ))),
        }
    }

    async fn load_referenced_items(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<HashMap<i64, CatalogItem>> {
        let mut ids: Vec<i64> = request.items.iter().map(|line| line.item_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let found = with_timeout(
            self.query_timeout,
            self.catalog_repository.find_by_ids(&ids),
        )
        .await?;

        let by_id: HashMap<i64, CatalogItem> =
            found.into_iter().map(|item| (item.id, item)).collect();

        for id in &ids {
            if !by_id.contains_key(id) {
                return Err(AppError::not_found(format!("Item {} not found", id)));
            }
        }

        Ok(by_id)
    }

    fn generate_transaction_number(date: DateTime<Utc>) -> String {
        let entropy = Uuid::new_v4().simple().to_string();
        format!(
            "TRX-{}-{}",
            date.format("%Y%m%d"),
            entropy[..6].to_uppercase()
        )
    }
}

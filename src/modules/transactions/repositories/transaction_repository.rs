use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::{money, AppError, Result};
use crate::modules::transactions::models::{
    NewTransaction, Transaction, TransactionFilter, TransactionLine, TransactionStatus,
};

const TRANSACTION_COLUMNS: &str = "id, transaction_number, customer_name, customer_address, \
     customer_phone, customer_email, status, subtotal, ppn_enabled, ppn_amount, \
     regional_tax_enabled, regional_tax_amount, pph22_enabled, pph22_amount, \
     pph23_enabled, pph23_amount, stamp_duty_required, stamp_duty_amount, \
     total_amount, notes, transaction_date, created_at, updated_at";

/// Repository for transaction persistence
///
/// The header and its lines are always written inside one database
/// transaction, so a failed insert leaves no partial rows behind.
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewTransaction) -> Result<Transaction> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                transaction_number, customer_name, customer_address, customer_phone,
                customer_email, status, subtotal, ppn_enabled, ppn_amount,
                regional_tax_enabled, regional_tax_amount, pph22_enabled, pph22_amount,
                pph23_enabled, pph23_amount, stamp_duty_required, stamp_duty_amount,
                total_amount, notes, transaction_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.transaction_number)
        .bind(new.customer_name.trim())
        .bind(&new.customer_address)
        .bind(&new.customer_phone)
        .bind(&new.customer_email)
        .bind(new.status.to_string())
        .bind(new.subtotal.to_string())
        .bind(new.ppn_enabled)
        .bind(new.ppn_amount.to_string())
        .bind(new.regional_tax_enabled)
        .bind(new.regional_tax_amount.to_string())
        .bind(new.pph22_enabled)
        .bind(new.pph22_amount.to_string())
        .bind(new.pph23_enabled)
        .bind(new.pph23_amount.to_string())
        .bind(new.stamp_duty_required)
        .bind(new.stamp_duty_amount.to_string())
        .bind(new.total_amount.to_string())
        .bind(&new.notes)
        .bind(new.transaction_date)
        .bind(now)
        .bind(now)
        .execute(tx.as_mut())
        .await
        .map_err(|e| Self::map_number_conflict(e, &new.transaction_number))?;

        let transaction_id = result.last_insert_rowid();

        for line in &new.lines {
            sqlx::query(
                r#"
                INSERT INTO transaction_items (
                    transaction_id, item_id, item_code, item_name,
                    quantity, unit_price, discount_percent, line_total
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(transaction_id)
            .bind(line.item_id)
            .bind(&line.item_code)
            .bind(&line.item_name)
            .bind(line.quantity.to_string())
            .bind(line.unit_price.to_string())
            .bind(line.discount_percent.to_string())
            .bind(line.line_total.to_string())
            .execute(tx.as_mut())
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(transaction_id).await?.ok_or_else(|| {
            AppError::internal(format!(
                "Transaction {} was created but not found",
                transaction_id
            ))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut lines_by_transaction = self.lines_for(&[id]).await?;
        let lines = lines_by_transaction.remove(&id).unwrap_or_default();

        Ok(Some(row.into_domain(lines)?))
    }

    pub async fn find_status(&self, id: i64) -> Result<Option<TransactionStatus>> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM transactions WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        status
            .map(|s| s.parse().map_err(AppError::internal))
            .transpose()
    }

    /// Newest-first page of transactions matching the filter, lines included.
    pub async fn history(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM transactions WHERE 1=1",
            TRANSACTION_COLUMNS
        ));

        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.to_string());
        }
        if let Some(name) = &filter.customer_name {
            builder.push(" AND customer_name LIKE ");
            builder.push_bind(format!("%{}%", name));
        }
        if let Some(from) = filter.date_from {
            builder.push(" AND transaction_date >= ");
            builder.push_bind(from.and_time(NaiveTime::MIN).and_utc());
        }
        if let Some(to) = filter.date_to {
            let upper = to.checked_add_days(Days::new(1)).ok_or_else(|| {
                AppError::validation(format!("date_to {} is out of range", to))
            })?;
            builder.push(" AND transaction_date < ");
            builder.push_bind(upper.and_time(NaiveTime::MIN).and_utc());
        }

        builder.push(" ORDER BY transaction_date DESC, id DESC LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        let rows = builder
            .build_query_as::<TransactionRow>()
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut lines_by_transaction = self.lines_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let lines = lines_by_transaction.remove(&row.id).unwrap_or_default();
                row.into_domain(lines)
            })
            .collect()
    }

    /// Rewrite every mutable header column from the given state.
    pub async fn update(&self, transaction: &Transaction) -> Result<Transaction> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET customer_name = ?, customer_address = ?, customer_phone = ?,
                customer_email = ?, status = ?, subtotal = ?, ppn_enabled = ?,
                ppn_amount = ?, regional_tax_enabled = ?, regional_tax_amount = ?,
                pph22_enabled = ?, pph22_amount = ?, pph23_enabled = ?, pph23_amount = ?,
                stamp_duty_required = ?, stamp_duty_amount = ?, total_amount = ?,
                notes = ?, transaction_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.customer_name.trim())
        .bind(&transaction.customer_address)
        .bind(&transaction.customer_phone)
        .bind(&transaction.customer_email)
        .bind(transaction.status.to_string())
        .bind(transaction.subtotal.to_string())
        .bind(transaction.ppn_enabled)
        .bind(transaction.ppn_amount.to_string())
        .bind(transaction.regional_tax_enabled)
        .bind(transaction.regional_tax_amount.to_string())
        .bind(transaction.pph22_enabled)
        .bind(transaction.pph22_amount.to_string())
        .bind(transaction.pph23_enabled)
        .bind(transaction.pph23_amount.to_string())
        .bind(transaction.stamp_duty_required)
        .bind(transaction.stamp_duty_amount.to_string())
        .bind(transaction.total_amount.to_string())
        .bind(&transaction.notes)
        .bind(transaction.transaction_date)
        .bind(Utc::now())
        .bind(transaction.id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(transaction.id).await?.ok_or_else(|| {
            AppError::internal(format!(
                "Transaction {} was updated but not found",
                transaction.id
            ))
        })
    }

    /// Delete only while still a draft; the status check and the delete are
    /// one atomic statement. Returns whether a row was removed.
    pub async fn delete_draft(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ? AND status = 'draft'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn lines_for(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<TransactionLine>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, transaction_id, item_id, item_code, item_name, quantity, \
             unit_price, discount_percent, line_total FROM transaction_items \
             WHERE transaction_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        let rows = builder
            .build_query_as::<TransactionLineRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i64, Vec<TransactionLine>> = HashMap::new();
        for row in rows {
            let line = row.into_domain()?;
            grouped.entry(line.transaction_id).or_default().push(line);
        }
        Ok(grouped)
    }

    fn map_number_conflict(e: sqlx::Error, number: &str) -> AppError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Transaction number {} already exists", number))
            }
            _ => AppError::Database(e),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    transaction_number: String,
    customer_name: String,
    customer_address: Option<String>,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    status: String,
    subtotal: String,
    ppn_enabled: bool,
    ppn_amount: String,
    regional_tax_enabled: bool,
    regional_tax_amount: String,
    pph22_enabled: bool,
    pph22_amount: String,
    pph23_enabled: bool,
    pph23_amount: String,
    stamp_duty_required: bool,
    stamp_duty_amount: String,
    total_amount: String,
    notes: Option<String>,
    transaction_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self, items: Vec<TransactionLine>) -> Result<Transaction> {
        Ok(Transaction {
            id: self.id,
            transaction_number: self.transaction_number,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            status: self.status.parse().map_err(AppError::internal)?,
            subtotal: money::parse_stored("subtotal", &self.subtotal)?,
            ppn_enabled: self.ppn_enabled,
            ppn_amount: money::parse_stored("ppn_amount", &self.ppn_amount)?,
            regional_tax_enabled: self.regional_tax_enabled,
            regional_tax_amount: money::parse_stored(
                "regional_tax_amount",
                &self.regional_tax_amount,
            )?,
            pph22_enabled: self.pph22_enabled,
            pph22_amount: money::parse_stored("pph22_amount", &self.pph22_amount)?,
            pph23_enabled: self.pph23_enabled,
            pph23_amount: money::parse_stored("pph23_amount", &self.pph23_amount)?,
            stamp_duty_required: self.stamp_duty_required,
            stamp_duty_amount: money::parse_stored("stamp_duty_amount", &self.stamp_duty_amount)?,
            total_amount: money::parse_stored("total_amount", &self.total_amount)?,
            notes: self.notes,
            transaction_date: self.transaction_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionLineRow {
    id: i64,
    transaction_id: i64,
    item_id: i64,
    item_code: String,
    item_name: String,
    quantity: String,
    unit_price: String,
    discount_percent: String,
    line_total: String,
}

impl TransactionLineRow {
    fn into_domain(self) -> Result<TransactionLine> {
        Ok(TransactionLine {
            id: self.id,
            transaction_id: self.transaction_id,
            item_id: self.item_id,
            item_code: self.item_code,
            item_name: self.item_name,
            quantity: money::parse_stored("quantity", &self.quantity)?,
            unit_price: money::parse_stored("unit_price", &self.unit_price)?,
            discount_percent: money::parse_stored("discount_percent", &self.discount_percent)?,
            line_total: money::parse_stored("line_total", &self.line_total)?,
        })
    }
}

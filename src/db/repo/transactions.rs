use super::{decimal_column, Repository};
use crate::domain::{FundStatus, RecordId, TimeMs, Transaction};
use crate::engine::DateRange;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;

const SELECT_COLUMNS: &str = r#"
    SELECT id, customer_name, currency, deposit_amount, exchange_rate,
           commission_percentage, transfer_fee, violation_penalty,
           acceptance_usdt, settlement_usdt, fund_status, maintenance_days,
           created_date, deposit_date, maintenance_end_date, remarks
    FROM transactions
"#;

fn transaction_from_row(row: &SqliteRow) -> Transaction {
    let status_str: String = row.get("fund_status");
    let fund_status = status_str.parse::<FundStatus>().unwrap_or_else(|_| {
        warn!("Unknown fund_status {:?}, treating as pending", status_str);
        FundStatus::Pending
    });

    Transaction {
        id: RecordId::new(row.get("id")),
        customer_name: row.get("customer_name"),
        currency: row.get("currency"),
        deposit_amount: decimal_column(row, "deposit_amount"),
        exchange_rate: decimal_column(row, "exchange_rate"),
        commission_percentage: decimal_column(row, "commission_percentage"),
        transfer_fee: decimal_column(row, "transfer_fee"),
        violation_penalty: decimal_column(row, "violation_penalty"),
        acceptance_usdt: decimal_column(row, "acceptance_usdt"),
        settlement_usdt: decimal_column(row, "settlement_usdt"),
        fund_status,
        maintenance_days: row.get("maintenance_days"),
        created_date: TimeMs::new(row.get("created_date")),
        deposit_date: row.get::<Option<i64>, _>("deposit_date").map(TimeMs::new),
        maintenance_end_date: row
            .get::<Option<i64>, _>("maintenance_end_date")
            .map(TimeMs::new),
        remarks: row.get("remarks"),
    }
}

impl Repository {
    // =========================================================================
    // Transaction operations
    // =========================================================================

    /// Insert a new transaction.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including on a duplicate id.
    pub async fn insert_transaction(&self, tx: &Transaction) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, customer_name, currency, deposit_amount, exchange_rate,
                commission_percentage, transfer_fee, violation_penalty,
                acceptance_usdt, settlement_usdt, fund_status, maintenance_days,
                created_date, deposit_date, maintenance_end_date, remarks, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tx.id.as_str())
        .bind(tx.customer_name.as_str())
        .bind(tx.currency.as_str())
        .bind(tx.deposit_amount.to_canonical_string())
        .bind(tx.exchange_rate.to_canonical_string())
        .bind(tx.commission_percentage.to_canonical_string())
        .bind(tx.transfer_fee.to_canonical_string())
        .bind(tx.violation_penalty.to_canonical_string())
        .bind(tx.acceptance_usdt.to_canonical_string())
        .bind(tx.settlement_usdt.to_canonical_string())
        .bind(tx.fund_status.label())
        .bind(tx.maintenance_days)
        .bind(tx.created_date.as_ms())
        .bind(tx.deposit_date.map(|t| t.as_ms()))
        .bind(tx.maintenance_end_date.map(|t| t.as_ms()))
        .bind(tx.remarks.as_deref())
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite every mutable field of an existing transaction.
    ///
    /// Returns false if no row has that id.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_transaction(&self, tx: &Transaction) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                customer_name = ?, currency = ?, deposit_amount = ?, exchange_rate = ?,
                commission_percentage = ?, transfer_fee = ?, violation_penalty = ?,
                acceptance_usdt = ?, settlement_usdt = ?, fund_status = ?,
                maintenance_days = ?, deposit_date = ?, maintenance_end_date = ?,
                remarks = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(tx.customer_name.as_str())
        .bind(tx.currency.as_str())
        .bind(tx.deposit_amount.to_canonical_string())
        .bind(tx.exchange_rate.to_canonical_string())
        .bind(tx.commission_percentage.to_canonical_string())
        .bind(tx.transfer_fee.to_canonical_string())
        .bind(tx.violation_penalty.to_canonical_string())
        .bind(tx.acceptance_usdt.to_canonical_string())
        .bind(tx.settlement_usdt.to_canonical_string())
        .bind(tx.fund_status.label())
        .bind(tx.maintenance_days)
        .bind(tx.deposit_date.map(|t| t.as_ms()))
        .bind(tx.maintenance_end_date.map(|t| t.as_ms()))
        .bind(tx.remarks.as_deref())
        .bind(chrono::Utc::now().timestamp_millis())
        .bind(tx.id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a transaction by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_transaction(&self, id: &RecordId) -> Result<Option<Transaction>, sqlx::Error> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(transaction_from_row))
    }

    /// Delete a transaction. Returns false if it did not exist.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn delete_transaction(&self, id: &RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Query transactions whose deposit date (or creation date when unset)
    /// falls in `range`, optionally restricted to one status.
    ///
    /// Ordered by that date descending, then id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_transactions(
        &self,
        range: &DateRange,
        status: Option<FundStatus>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let (from_ms, to_ms) = range.bounds_ms();

        let sql = if status.is_some() {
            format!(
                "{} WHERE COALESCE(deposit_date, created_date) BETWEEN ? AND ? AND fund_status = ? \
                 ORDER BY COALESCE(deposit_date, created_date) DESC, id ASC",
                SELECT_COLUMNS
            )
        } else {
            format!(
                "{} WHERE COALESCE(deposit_date, created_date) BETWEEN ? AND ? \
                 ORDER BY COALESCE(deposit_date, created_date) DESC, id ASC",
                SELECT_COLUMNS
            )
        };

        let mut query = sqlx::query(&sql).bind(from_ms).bind(to_ms);
        if let Some(status) = status {
            query = query.bind(status.label());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(transaction_from_row).collect())
    }
}

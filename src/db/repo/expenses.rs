use super::{decimal_column, Repository};
use crate::domain::{Expense, RecordId, TimeMs};
use crate::engine::DateRange;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn expense_from_row(row: &SqliteRow) -> Expense {
    Expense {
        id: RecordId::new(row.get("id")),
        amount: decimal_column(row, "amount"),
        category: row.get("category"),
        description: row.get("description"),
        spent_at: TimeMs::new(row.get("spent_at")),
        created_date: TimeMs::new(row.get("created_date")),
    }
}

impl Repository {
    // =========================================================================
    // Expense operations
    // =========================================================================

    pub async fn insert_expense(&self, expense: &Expense) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, amount, category, description, spent_at, created_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.as_str())
        .bind(expense.amount.to_canonical_string())
        .bind(expense.category.as_str())
        .bind(expense.description.as_deref())
        .bind(expense.spent_at.as_ms())
        .bind(expense.created_date.as_ms())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns false if no row has that id.
    pub async fn update_expense(&self, expense: &Expense) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE expenses SET amount = ?, category = ?, description = ?, spent_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.amount.to_canonical_string())
        .bind(expense.category.as_str())
        .bind(expense.description.as_deref())
        .bind(expense.spent_at.as_ms())
        .bind(expense.id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_expense(&self, id: &RecordId) -> Result<Option<Expense>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, amount, category, description, spent_at, created_date
            FROM expenses WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(expense_from_row))
    }

    pub async fn delete_expense(&self, id: &RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Expenses spent within `range`, optionally in one category, newest first.
    pub async fn query_expenses(
        &self,
        range: &DateRange,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let (from_ms, to_ms) = range.bounds_ms();

        let sql = if category.is_some() {
            r#"
            SELECT id, amount, category, description, spent_at, created_date
            FROM expenses
            WHERE spent_at BETWEEN ? AND ? AND category = ?
            ORDER BY spent_at DESC, id ASC
            "#
        } else {
            r#"
            SELECT id, amount, category, description, spent_at, created_date
            FROM expenses
            WHERE spent_at BETWEEN ? AND ?
            ORDER BY spent_at DESC, id ASC
            "#
        };

        let mut query = sqlx::query(sql).bind(from_ms).bind(to_ms);
        if let Some(category) = category {
            query = query.bind(category);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(expense_from_row).collect())
    }
}

//! Personal finance storage: transactions and debts.

use rusqlite::{params, Row};

use crate::error::FlowError;
use crate::storage::types::{Debt, FinanceSummary, Transaction};
use crate::storage::Database;

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        date: row.get(3)?,
        is_expense: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn debt_from_row(row: &Row<'_>) -> rusqlite::Result<Debt> {
    Ok(Debt {
        id: row.get(0)?,
        person: row.get(1)?,
        amount: row.get(2)?,
        is_owed_by_me: row.get(3)?,
        due_date: row.get(4)?,
        start_date: row.get(5)?,
        payment_day: row.get(6)?,
        initial_amount: row.get(7)?,
        currency: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Record an income or expense.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_transaction(db: &Database, tx: &Transaction) -> Result<(), FlowError> {
    db.connection()
        .execute(
            "INSERT INTO transactions (id, amount, category, date, is_expense, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.id,
                tx.amount,
                tx.category,
                tx.date,
                tx.is_expense,
                tx.description,
                tx.created_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to insert transaction: {e}")))?;
    Ok(())
}

/// List transactions, most recent first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn transactions(db: &Database, limit: Option<u32>) -> Result<Vec<Transaction>, FlowError> {
    let mut sql = "SELECT id, amount, category, date, is_expense, description, created_at
                   FROM transactions
                   ORDER BY date DESC, created_at DESC"
        .to_string();
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let conn = db.connection();
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| FlowError::Database(format!("Failed to prepare transaction query: {e}")))?;

    let iter = stmt
        .query_map([], transaction_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query transactions: {e}")))?;

    let mut rows = Vec::new();
    for tx in iter {
        rows.push(tx.map_err(|e| FlowError::Database(format!("Failed to read transaction: {e}")))?);
    }
    Ok(rows)
}

/// Delete a transaction.
///
/// # Errors
///
/// Returns `NotFound` if no transaction has that id.
pub fn delete_transaction(db: &Database, id: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute("DELETE FROM transactions WHERE id = ?1", params![id])
        .map_err(|e| FlowError::Database(format!("Failed to delete transaction: {e}")))?;

    if affected == 0 {
        Err(FlowError::NotFound(format!("transaction {id}")))
    } else {
        Ok(())
    }
}

/// Record a debt.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_debt(db: &Database, debt: &Debt) -> Result<(), FlowError> {
    db.connection()
        .execute(
            "INSERT INTO debts (id, person, amount, is_owed_by_me, due_date, start_date,
                                payment_day, initial_amount, currency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                debt.id,
                debt.person,
                debt.amount,
                debt.is_owed_by_me,
                debt.due_date,
                debt.start_date,
                debt.payment_day,
                debt.initial_amount,
                debt.currency,
                debt.created_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to insert debt: {e}")))?;
    Ok(())
}

/// List debts, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn debts(db: &Database) -> Result<Vec<Debt>, FlowError> {
    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT id, person, amount, is_owed_by_me, due_date, start_date,
                    payment_day, initial_amount, currency, created_at
             FROM debts
             ORDER BY created_at DESC",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare debt query: {e}")))?;

    let iter = stmt
        .query_map([], debt_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query debts: {e}")))?;

    let mut rows = Vec::new();
    for debt in iter {
        rows.push(debt.map_err(|e| FlowError::Database(format!("Failed to read debt: {e}")))?);
    }
    Ok(rows)
}

/// Settle a debt: remove it from the ledger.
///
/// # Errors
///
/// Returns `NotFound` if no debt has that id.
pub fn settle_debt(db: &Database, id: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute("DELETE FROM debts WHERE id = ?1", params![id])
        .map_err(|e| FlowError::Database(format!("Failed to settle debt: {e}")))?;

    if affected == 0 {
        Err(FlowError::NotFound(format!("debt {id}")))
    } else {
        Ok(())
    }
}

/// Fetch the whole finance picture in one call.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn summary(db: &Database) -> Result<FinanceSummary, FlowError> {
    Ok(FinanceSummary {
        transactions: transactions(db, None)?,
        debts: debts(db)?,
    })
}

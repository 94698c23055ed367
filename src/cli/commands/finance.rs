//! Finance subcommands.

use chrono::Utc;
use uuid::Uuid;

use crate::cli::args::{FinanceCommands, OutputFormat};
use crate::error::FlowError;
use crate::output::{format_finance, to_json};
use crate::storage::{finance, Database, Debt, FinanceSummary, Transaction};

use super::parse_deadline_phrase;

fn record_transaction(
    db: &Database,
    amount: f64,
    category: String,
    note: Option<String>,
    is_expense: bool,
) -> Result<String, FlowError> {
    if amount <= 0.0 {
        return Err(FlowError::InvalidInput(
            "amount must be positive".to_string(),
        ));
    }

    let now_ms = Utc::now().timestamp_millis();
    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        amount,
        category,
        date: now_ms,
        is_expense,
        description: note,
        created_at: now_ms,
    };
    finance::add_transaction(db, &tx)?;

    let kind = if is_expense { "expense" } else { "income" };
    Ok(format!(
        "Recorded {kind}: {:.2} ({}) (ID: {})",
        tx.amount, tx.category, tx.id
    ))
}

/// Execute finance subcommands.
///
/// # Errors
///
/// Returns an error if input validation or the database operation fails.
pub fn finance(
    db: &Database,
    cmd: FinanceCommands,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match cmd {
        FinanceCommands::Spend {
            amount,
            category,
            note,
        } => record_transaction(db, amount, category, note, true),
        FinanceCommands::Income {
            amount,
            category,
            note,
        } => record_transaction(db, amount, category, note, false),
        FinanceCommands::Transactions { limit } => {
            let rows = finance::transactions(db, limit)?;
            match format {
                OutputFormat::Json => to_json(&rows),
                OutputFormat::Pretty => Ok(crate::output::format_finance_pretty(&FinanceSummary {
                    transactions: rows,
                    debts: vec![],
                })),
            }
        }
        FinanceCommands::RemoveTransaction { id } => {
            finance::delete_transaction(db, &id)?;
            Ok(format!("Deleted transaction: {id}"))
        }
        FinanceCommands::DebtAdd {
            person,
            amount,
            owed_by_me,
            currency,
            due,
        } => {
            if amount <= 0.0 {
                return Err(FlowError::InvalidInput(
                    "amount must be positive".to_string(),
                ));
            }

            let due_date = due.map(|phrase| parse_deadline_phrase(&phrase)).transpose()?;
            let now_ms = Utc::now().timestamp_millis();
            let debt = Debt {
                id: Uuid::new_v4().to_string(),
                person,
                amount,
                is_owed_by_me: owed_by_me,
                due_date,
                start_date: Some(now_ms),
                payment_day: None,
                initial_amount: Some(amount),
                currency,
                created_at: now_ms,
            };
            finance::add_debt(db, &debt)?;

            let direction = if owed_by_me { "I owe" } else { "owes me" };
            Ok(format!(
                "Recorded debt: {} {direction} {:.2} {} (ID: {})",
                debt.person, debt.amount, debt.currency, debt.id
            ))
        }
        FinanceCommands::Debts => {
            let rows = finance::debts(db)?;
            match format {
                OutputFormat::Json => to_json(&rows),
                OutputFormat::Pretty => Ok(crate::output::format_finance_pretty(&FinanceSummary {
                    transactions: vec![],
                    debts: rows,
                })),
            }
        }
        FinanceCommands::Settle { id } => {
            finance::settle_debt(db, &id)?;
            Ok(format!("Settled debt: {id}"))
        }
        FinanceCommands::Summary => format_finance(&finance::summary(db)?, format),
    }
}

//! Dynamic batch updates over the item table.
//!
//! Each element of the request's `updates` array names an `ItemID` plus an
//! arbitrary set of columns to assign. The payload is parsed once into a
//! typed plan, then applied row by row inside a single transaction that
//! aborts on the first missing item.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::database::manager::DatabaseManager;
use crate::database::value::SqlValue;

const ITEM_TABLE: &str = "iteminfo";
const ITEM_ID: &str = "ItemID";

/// Synthetic columns that must never become assignment targets.
const RESERVED_COLUMNS: &[&str] = &["RowNum"];

#[derive(Debug, Error, PartialEq)]
pub enum BatchError {
    /// The `updates` value was missing, not an array, or empty.
    #[error("invalid updates payload")]
    InvalidPayload,

    /// An UPDATE matched zero rows; the referenced item does not exist.
    #[error("ItemID {0} not found")]
    MissingItem(i64),

    /// Could not reach the store or open the transaction.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// A statement failed mid-batch.
    #[error("batch update failed: {0}")]
    Failed(String),
}

/// A single-row UPDATE built from one element of the batch payload.
#[derive(Debug, PartialEq)]
pub struct RowUpdate {
    pub item_id: i64,
    pub assignments: Vec<(String, SqlValue)>,
}

impl RowUpdate {
    /// Statement text: one numbered placeholder per assignment, then a final
    /// placeholder for the key.
    pub fn sql(&self) -> String {
        let set_clauses: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", quote_ident(column), i + 1))
            .collect();

        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            quote_ident(ITEM_TABLE),
            set_clauses.join(", "),
            quote_ident(ITEM_ID),
            self.assignments.len() + 1
        )
    }
}

/// Quote an SQL identifier; assignment targets arrive from the client.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the per-row plan from the request's `updates` value.
///
/// Elements without a usable integer `ItemID` are dropped silently, as are
/// null values and reserved columns within an element; an element left with
/// no assignments becomes a no-op. Only a missing, non-array, or empty
/// `updates` value rejects the whole call.
pub fn build_plan(updates: Option<&Value>) -> Result<Vec<RowUpdate>, BatchError> {
    let elements = match updates {
        Some(Value::Array(elements)) if !elements.is_empty() => elements,
        _ => return Err(BatchError::InvalidPayload),
    };

    let mut plan = Vec::new();
    for element in elements {
        let Some(fields) = element.as_object() else {
            continue;
        };
        let Some(item_id) = fields.get(ITEM_ID).and_then(Value::as_i64) else {
            continue;
        };

        let mut assignments = Vec::new();
        for (column, value) in fields {
            if column == ITEM_ID || RESERVED_COLUMNS.contains(&column.as_str()) {
                continue;
            }
            if let Some(value) = SqlValue::infer(value) {
                assignments.push((column.clone(), value));
            }
        }

        if assignments.is_empty() {
            continue;
        }
        plan.push(RowUpdate { item_id, assignments });
    }

    Ok(plan)
}

/// Why a batch run was rolled back.
#[derive(Debug, Clone, PartialEq)]
pub enum RollbackReason {
    MissingItem(i64),
    Failed(String),
}

/// Transaction lifecycle for one batch call.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchState {
    Open,
    Applying(usize),
    Committed,
    RolledBack(RollbackReason),
}

/// State machine the executor walks while applying a plan.
///
/// Open -> Applying(0) -> ... -> Applying(n-1) -> Committed, or a jump to
/// RolledBack the moment a row is missing or a statement errors. Terminal
/// states accept no further transitions, which keeps the all-or-nothing
/// contract checkable without a live store.
#[derive(Debug)]
pub struct BatchRun {
    state: BatchState,
    applied: usize,
}

impl BatchRun {
    pub fn new() -> Self {
        Self {
            state: BatchState::Open,
            applied: 0,
        }
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            BatchState::Committed | BatchState::RolledBack(_)
        )
    }

    /// Number of row updates applied so far in this run.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Enter `Applying(index)` before issuing that row's statement.
    pub fn start(&mut self, index: usize) {
        debug_assert!(!self.is_terminal());
        self.state = BatchState::Applying(index);
    }

    /// Feed in the row count the statement reported. Zero rows means the
    /// item does not exist and the whole run rolls back.
    pub fn row_result(&mut self, item_id: i64, rows_affected: u64) -> Result<(), BatchError> {
        debug_assert!(matches!(self.state, BatchState::Applying(_)));
        if rows_affected == 0 {
            self.state = BatchState::RolledBack(RollbackReason::MissingItem(item_id));
            return Err(BatchError::MissingItem(item_id));
        }
        self.applied += 1;
        Ok(())
    }

    /// A statement or commit failure aborts the run.
    pub fn error(&mut self, message: impl Into<String>) -> BatchError {
        let message = message.into();
        self.state = BatchState::RolledBack(RollbackReason::Failed(message.clone()));
        BatchError::Failed(message)
    }

    /// Every row applied and the transaction committed.
    pub fn commit(&mut self) {
        debug_assert!(!self.is_terminal());
        self.state = BatchState::Committed;
    }
}

impl Default for BatchRun {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a parsed plan inside one transaction.
///
/// Rows are applied in order; the first UPDATE that matches nothing rolls
/// the whole transaction back, so either every row in the plan takes effect
/// or none do.
pub async fn execute_batch(plan: Vec<RowUpdate>) -> Result<(), BatchError> {
    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| BatchError::Connection(e.to_string()))?;
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| BatchError::Connection(e.to_string()))?;

    let mut run = BatchRun::new();
    for (index, update) in plan.iter().enumerate() {
        run.start(index);
        let sql = update.sql();
        debug!(item_id = update.item_id, "{}", sql);

        let mut query = sqlx::query(&sql);
        for (_, value) in &update.assignments {
            query = value.bind(query);
        }
        query = query.bind(update.item_id);

        let result = match query.execute(&mut *tx).await {
            Ok(result) => result,
            Err(e) => {
                let err = run.error(e.to_string());
                tx.rollback().await.ok();
                tracing::warn!("batch aborted: {:?}", run.state());
                return Err(err);
            }
        };

        if let Err(err) = run.row_result(update.item_id, result.rows_affected()) {
            tx.rollback().await.ok();
            tracing::warn!("batch aborted: {:?}", run.state());
            return Err(err);
        }
    }

    match tx.commit().await {
        Ok(()) => {
            run.commit();
            debug!("batch committed: {} rows updated", run.applied());
            Ok(())
        }
        Err(e) => Err(run.error(e.to_string())),
    }
}

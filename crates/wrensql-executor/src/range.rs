//! Range descriptors
//!
//! A `RangeDescriptor` is the static description of one FROM-clause table
//! reference: table identity, optional alias, a stable join-order position
//! (the arena index plans and predicates use to name it), join-type flags,
//! and the scan plans for its ON and WHERE predicates. Descriptors are
//! built once at compile time; after that only append-only pushdown
//! additions occur, and executions share them read-only.
//!
//! Condition routing follows the join shape: ON conditions always go to
//! the join side; WHERE conditions go to the where side only for outer
//! ranges, where they must not discard rows before padding decisions are
//! made, and to the join side otherwise.

use wrensql_storage::Database;

use crate::errors::ExecutorError;
use crate::expr::Expression;
use crate::plan::ScanPlan;

/// Static description of one FROM-clause table reference
#[derive(Debug, Clone)]
pub struct RangeDescriptor {
    table: String,
    alias: Option<String>,
    position: usize,
    is_left_join: bool,
    is_right_join: bool,
    is_join: bool,
    join_plans: Vec<ScanPlan>,
    where_plans: Vec<ScanPlan>,
    column_count: usize,
}

impl RangeDescriptor {
    /// Create a descriptor for a table at a join-order position
    pub fn new(database: &Database, table: &str, position: usize) -> Result<Self, ExecutorError> {
        let column_count = database.table(table)?.column_count();
        Ok(RangeDescriptor {
            table: table.to_string(),
            alias: None,
            position,
            is_left_join: false,
            is_right_join: false,
            is_join: false,
            join_plans: vec![ScanPlan::full_scan(position)],
            where_plans: vec![ScanPlan::full_scan(position)],
            column_count,
        })
    }

    /// Attach a FROM-clause alias
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Stable join-order position; also the context's row slot index
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Flag the join type. Left and right together mean FULL OUTER.
    pub fn set_join_type(&mut self, left: bool, right: bool) {
        self.is_left_join = left;
        self.is_right_join = right;
        if left || right {
            self.is_join = true;
        }
    }

    /// Whether this range pads an all-null row when nothing matches
    pub fn is_left_join(&self) -> bool {
        self.is_left_join
    }

    /// Whether this range gets an anti-join pass for its unmatched rows
    pub fn is_right_join(&self) -> bool {
        self.is_right_join
    }

    pub fn is_outer(&self) -> bool {
        self.is_left_join || self.is_right_join
    }

    /// Whether this range takes part in an explicit join
    pub fn is_join(&self) -> bool {
        self.is_join
    }

    /// Replace the join-side plan with one driving the given index
    ///
    /// Must happen before any condition is added; the chosen index comes
    /// from plan selection, which is outside this layer.
    pub fn use_index(
        &mut self,
        database: &Database,
        index_number: usize,
    ) -> Result<(), ExecutorError> {
        let table = database.table(&self.table)?;
        let index = table.index(index_number).ok_or_else(|| {
            ExecutorError::IndexNotFound(format!("#{} on {}", index_number, self.table))
        })?;
        if self.join_plans.len() != 1 || self.join_plans[0].has_conditions() {
            return Err(ExecutorError::MalformedScanPlan(
                "index must be chosen before conditions are added".to_string(),
            ));
        }
        self.join_plans[0] =
            ScanPlan::with_index(self.position, index_number, index.sort_columns().to_vec())?;
        Ok(())
    }

    /// Add an ON-clause condition; conjuncts are classified one by one
    pub fn add_join_condition(&mut self, predicate: Expression) {
        self.is_join = true;
        for conjunct in predicate.split_conjuncts() {
            for plan in &mut self.join_plans {
                plan.add_condition(conjunct.clone());
            }
        }
    }

    /// Add a WHERE-clause condition
    ///
    /// For outer ranges the condition lands on the where side so it cannot
    /// suppress rows before outer-join padding is decided; otherwise it
    /// drives the join-side scan like an ON condition.
    pub fn add_where_condition(&mut self, predicate: Expression) {
        if self.is_outer() {
            for conjunct in predicate.split_conjuncts() {
                for plan in &mut self.where_plans {
                    plan.add_condition(conjunct.clone());
                }
            }
        } else {
            for conjunct in predicate.split_conjuncts() {
                for plan in &mut self.join_plans {
                    plan.add_condition(conjunct.clone());
                }
            }
        }
    }

    /// Install one scan plan per disjunct of an OR-expanded access predicate
    ///
    /// Later disjuncts get an exclude predicate built from the full
    /// predicates of every earlier disjunct, so a row served by two access
    /// paths is produced exactly once.
    pub fn add_join_disjuncts(&mut self, mut plans: Vec<ScanPlan>) -> Result<(), ExecutorError> {
        if plans.is_empty() {
            return Err(ExecutorError::MalformedScanPlan(
                "disjunct expansion requires at least one plan".to_string(),
            ));
        }
        for plan in &plans {
            if plan.range() != self.position {
                return Err(ExecutorError::MalformedScanPlan(format!(
                    "disjunct plan for range {} installed on range {}",
                    plan.range(),
                    self.position
                )));
            }
        }
        let mut earlier: Vec<Expression> = Vec::new();
        for plan in plans.iter_mut() {
            if let Some(seen) = Expression::disjunction(earlier.clone()) {
                plan.set_exclude(seen);
            }
            if let Some(full) = plan.full_predicate() {
                earlier.push(full);
            }
        }
        self.is_join = true;
        self.join_plans = plans;
        Ok(())
    }

    /// Check the compiled shape: the two plan sequences must not both
    /// carry index bounds
    pub fn validate(&self) -> Result<(), ExecutorError> {
        let join_bearing = self.join_plans.iter().any(ScanPlan::is_index_bearing);
        let where_bearing = self.where_plans.iter().any(ScanPlan::is_index_bearing);
        if join_bearing && where_bearing {
            return Err(ExecutorError::MalformedScanPlan(format!(
                "range {} has index bounds on both condition sides",
                self.position
            )));
        }
        Ok(())
    }

    /// The plans driving the normal scan over this range
    pub fn scan_plans(&self) -> &[ScanPlan] {
        &self.join_plans
    }

    /// The plans covering the range's full domain, used by anti-join passes
    pub(crate) fn where_plans(&self) -> &[ScanPlan] {
        &self.where_plans
    }

    /// WHERE-side residual applied during the normal scan of outer ranges
    pub(crate) fn where_residual(&self) -> Option<&Expression> {
        self.where_plans.first().and_then(ScanPlan::residual)
    }

    /// Mutable access to the join-side plans, for reversal before first use
    pub fn scan_plans_mut(&mut self) -> &mut [ScanPlan] {
        &mut self.join_plans
    }
}

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::DriverError;
use crate::native::{
    CallableConnection, CallableStatement, NativeConnection, NativeStatement, PlainStatement,
    PreparedStatement,
};
use crate::results::ResultSet;
use crate::statement::ResultSetShape;
use crate::types::{SqlType, SqlValue};

/// One native call observed by a [`RecordingConnection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateStatement,
    PrepareStatement(String),
    PrepareCall {
        sql: String,
        shape: Option<ResultSetShape>,
    },
    SetQueryTimeout(u32),
    SetFetchSize(u32),
    Bind {
        index: usize,
        value: SqlValue,
    },
    BindTyped {
        index: usize,
        value: SqlValue,
        sql_type: SqlType,
    },
    RegisterOut {
        index: usize,
        sql_type: SqlType,
    },
    ClearParameters,
    /// A prepared batch row, with the values bound when it was queued.
    AddBatch(Vec<SqlValue>),
    AddBatchSql(String),
    /// Any execution, with the text and the values bound at the time.
    Execute {
        sql: String,
        parameters: Vec<SqlValue>,
    },
    ExecuteBatch(usize),
    Close,
}

/// Operations a failure can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Create,
    Configure,
    Bind,
    Execute,
    IsClosed,
    Close,
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    failures: BTreeSet<Operation>,
    result_set: Option<ResultSet>,
    update_count: u64,
    out_values: BTreeMap<usize, SqlValue>,
}

impl Recorder {
    fn check(&self, op: Operation) -> Result<(), DriverError> {
        if self.failures.contains(&op) {
            Err(DriverError::new(format!("injected {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

type Shared = Rc<RefCell<Recorder>>;

fn record(shared: &Shared, op: Operation, call: Call) -> Result<(), DriverError> {
    let mut rec = shared.borrow_mut();
    rec.check(op)?;
    rec.calls.push(call);
    Ok(())
}

/// Scriptable in-memory client.
///
/// By default every execution reports no result set and an update count of
/// 0. Script a result set to make executions behave like queries.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnection {
    shared: Shared,
}

impl RecordingConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later execution produces a copy of `result_set`.
    pub fn script_result_set(&self, result_set: ResultSet) {
        self.shared.borrow_mut().result_set = Some(result_set);
    }

    /// Executions produce no result set and report `count` changed rows.
    pub fn script_update_count(&self, count: u64) {
        let mut rec = self.shared.borrow_mut();
        rec.result_set = None;
        rec.update_count = count;
    }

    /// Value reported for OUT parameter `index` after execution.
    pub fn script_out_value(&self, index: usize, value: SqlValue) {
        self.shared.borrow_mut().out_values.insert(index, value);
    }

    /// Make every later `op` fail.
    pub fn fail_on(&self, op: Operation) {
        self.shared.borrow_mut().failures.insert(op);
    }

    pub fn clear_failures(&self) {
        self.shared.borrow_mut().failures.clear();
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.shared.borrow().calls.clone()
    }

    /// Only the `Execute` calls, in order.
    #[must_use]
    pub fn executions(&self) -> Vec<Call> {
        self.shared
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Execute { .. }))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn count(&self, call: &Call) -> usize {
        self.shared
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }
}

#[derive(Debug)]
struct HandleCore {
    shared: Shared,
    closed: bool,
    pending: Option<ResultSet>,
    update_count: Option<u64>,
}

impl HandleCore {
    fn new(shared: Shared) -> Self {
        Self {
            shared,
            closed: false,
            pending: None,
            update_count: None,
        }
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            Err(DriverError::new("statement is closed"))
        } else {
            Ok(())
        }
    }

    fn execute(&mut self, sql: &str, parameters: Vec<SqlValue>) -> Result<bool, DriverError> {
        self.ensure_open()?;
        record(
            &self.shared,
            Operation::Execute,
            Call::Execute {
                sql: sql.to_string(),
                parameters,
            },
        )?;
        let rec = self.shared.borrow();
        match &rec.result_set {
            Some(rs) => {
                self.pending = Some(rs.clone());
                self.update_count = None;
                Ok(true)
            }
            None => {
                self.pending = None;
                self.update_count = Some(rec.update_count);
                Ok(false)
            }
        }
    }

    fn execute_update(&mut self, sql: &str, parameters: Vec<SqlValue>) -> Result<u64, DriverError> {
        if self.execute(sql, parameters)? {
            self.pending = None;
            return Err(DriverError::new("query returned a result set"));
        }
        Ok(self.update_count.unwrap_or(0))
    }

    fn execute_batch(&mut self, queued: usize) -> Result<Vec<u64>, DriverError> {
        self.ensure_open()?;
        record(&self.shared, Operation::Execute, Call::ExecuteBatch(queued))?;
        let count = self.shared.borrow().update_count;
        Ok(vec![count; queued])
    }
}

macro_rules! impl_recording_native {
    ($ty:ident) => {
        impl NativeStatement for $ty {
            fn set_query_timeout(&mut self, seconds: u32) -> Result<(), DriverError> {
                self.core.ensure_open()?;
                record(
                    &self.core.shared,
                    Operation::Configure,
                    Call::SetQueryTimeout(seconds),
                )
            }

            fn set_fetch_size(&mut self, rows: u32) -> Result<(), DriverError> {
                self.core.ensure_open()?;
                record(&self.core.shared, Operation::Configure, Call::SetFetchSize(rows))
            }

            fn result_set(&mut self) -> Result<Option<ResultSet>, DriverError> {
                self.core.ensure_open()?;
                Ok(self.core.pending.take())
            }

            fn update_count(&self) -> Result<Option<u64>, DriverError> {
                self.core.ensure_open()?;
                Ok(self.core.update_count)
            }

            fn is_closed(&self) -> Result<bool, DriverError> {
                self.core.shared.borrow().check(Operation::IsClosed)?;
                Ok(self.core.closed)
            }

            fn close(&mut self) -> Result<(), DriverError> {
                record(&self.core.shared, Operation::Close, Call::Close)?;
                self.core.closed = true;
                Ok(())
            }
        }
    };
}

/// Plain handle created by [`RecordingConnection`].
#[derive(Debug)]
pub struct RecordingStatement {
    core: HandleCore,
    batch: Vec<String>,
}

impl_recording_native!(RecordingStatement);

impl PlainStatement for RecordingStatement {
    fn execute(&mut self, sql: &str) -> Result<bool, DriverError> {
        self.core.execute(sql, Vec::new())
    }

    fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError> {
        self.core.execute_update(sql, Vec::new())
    }

    fn add_batch(&mut self, sql: &str) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(
            &self.core.shared,
            Operation::Bind,
            Call::AddBatchSql(sql.to_string()),
        )?;
        self.batch.push(sql.to_string());
        Ok(())
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError> {
        let queued = std::mem::take(&mut self.batch);
        self.core.execute_batch(queued.len())
    }
}

/// Prepared (and callable) handle created by [`RecordingConnection`].
#[derive(Debug)]
pub struct RecordingPrepared {
    core: HandleCore,
    sql: String,
    bound: Vec<SqlValue>,
    registered: BTreeMap<usize, SqlType>,
    batch: Vec<Vec<SqlValue>>,
}

impl RecordingPrepared {
    fn new(shared: Shared, sql: &str) -> Self {
        Self {
            core: HandleCore::new(shared),
            sql: sql.to_string(),
            bound: Vec::new(),
            registered: BTreeMap::new(),
            batch: Vec::new(),
        }
    }

    fn store(&mut self, index: usize, value: &SqlValue) -> Result<(), DriverError> {
        if index == 0 {
            return Err(DriverError::new("parameter indices start at 1"));
        }
        if self.bound.len() < index {
            self.bound.resize(index, SqlValue::Null);
        }
        self.bound[index - 1] = value.clone();
        Ok(())
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values currently bound, in position order.
    #[must_use]
    pub fn bound_values(&self) -> &[SqlValue] {
        &self.bound
    }
}

impl_recording_native!(RecordingPrepared);

impl PreparedStatement for RecordingPrepared {
    fn bind(&mut self, index: usize, value: &SqlValue) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(
            &self.core.shared,
            Operation::Bind,
            Call::Bind {
                index,
                value: value.clone(),
            },
        )?;
        self.store(index, value)
    }

    fn clear_parameters(&mut self) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(&self.core.shared, Operation::Bind, Call::ClearParameters)?;
        self.bound.clear();
        Ok(())
    }

    fn add_batch(&mut self) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(
            &self.core.shared,
            Operation::Bind,
            Call::AddBatch(self.bound.clone()),
        )?;
        self.batch.push(self.bound.clone());
        Ok(())
    }

    fn execute(&mut self) -> Result<bool, DriverError> {
        self.core.execute(&self.sql, self.bound.clone())
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        self.core.execute_update(&self.sql, self.bound.clone())
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError> {
        let queued = std::mem::take(&mut self.batch);
        self.core.execute_batch(queued.len())
    }
}

impl CallableStatement for RecordingPrepared {
    fn bind_typed(
        &mut self,
        index: usize,
        value: &SqlValue,
        sql_type: SqlType,
    ) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(
            &self.core.shared,
            Operation::Bind,
            Call::BindTyped {
                index,
                value: value.clone(),
                sql_type,
            },
        )?;
        self.store(index, value)
    }

    fn register_out_parameter(
        &mut self,
        index: usize,
        sql_type: SqlType,
    ) -> Result<(), DriverError> {
        self.core.ensure_open()?;
        record(
            &self.core.shared,
            Operation::Bind,
            Call::RegisterOut { index, sql_type },
        )?;
        self.registered.insert(index, sql_type);
        Ok(())
    }

    fn out_parameter(&self, index: usize) -> Result<SqlValue, DriverError> {
        self.core.ensure_open()?;
        if !self.registered.contains_key(&index) {
            return Err(DriverError::new(format!(
                "parameter {index} was not registered as an output parameter"
            )));
        }
        Ok(self
            .core
            .shared
            .borrow()
            .out_values
            .get(&index)
            .cloned()
            .unwrap_or(SqlValue::Null))
    }
}

impl NativeConnection for RecordingConnection {
    type Statement = RecordingStatement;
    type Prepared = RecordingPrepared;

    fn create_statement(&self) -> Result<Self::Statement, DriverError> {
        record(&self.shared, Operation::Create, Call::CreateStatement)?;
        Ok(RecordingStatement {
            core: HandleCore::new(Rc::clone(&self.shared)),
            batch: Vec::new(),
        })
    }

    fn prepare_statement(&self, sql: &str) -> Result<Self::Prepared, DriverError> {
        record(
            &self.shared,
            Operation::Create,
            Call::PrepareStatement(sql.to_string()),
        )?;
        Ok(RecordingPrepared::new(Rc::clone(&self.shared), sql))
    }
}

impl CallableConnection for RecordingConnection {
    type Callable = RecordingPrepared;

    fn prepare_call(
        &self,
        sql: &str,
        shape: Option<&ResultSetShape>,
    ) -> Result<Self::Callable, DriverError> {
        record(
            &self.shared,
            Operation::Create,
            Call::PrepareCall {
                sql: sql.to_string(),
                shape: shape.copied(),
            },
        )?;
        Ok(RecordingPrepared::new(Rc::clone(&self.shared), sql))
    }
}

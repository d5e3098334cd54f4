use crate::db::{self, DbPool, StudentFields};
use crate::error::StoreError;
use crate::record::{NewStudentRecord, StudentRecord};
use crate::settings::Database;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

pub trait RecordStore: Send + Sync {
    fn create(&self, record: NewStudentRecord) -> Result<StudentRecord, StoreError>;

    fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StoreError>;

    /// Overwrites an existing record and returns the persisted value.
    fn save(&self, record: &StudentRecord) -> Result<StudentRecord, StoreError>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(config: &Database) -> Result<Self, StoreError> {
        let pool = db::establish_pool(&config.url, config.max_connections, config.busy_timeout_ms)?;
        let mut conn = pool.get()?;
        db::run_migrations(&mut conn)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RecordStore for SqliteStore {
    fn create(&self, record: NewStudentRecord) -> Result<StudentRecord, StoreError> {
        let mut conn = self.pool.get()?;
        let row = db::insert_student(&mut conn, &StudentFields::from(&record))?;
        row.try_into()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StoreError> {
        let mut conn = self.pool.get()?;
        db::find_student(&mut conn, id)?
            .map(StudentRecord::try_from)
            .transpose()
    }

    fn save(&self, record: &StudentRecord) -> Result<StudentRecord, StoreError> {
        let mut conn = self.pool.get()?;
        db::update_student(&mut conn, record.id, &StudentFields::from(record))?
            .ok_or(StoreError::Missing(record.id))?
            .try_into()
    }
}

/// In-process store. Ids start at 1 and are never handed out twice.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    records: BTreeMap<i64, StudentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn create(&self, record: NewStudentRecord) -> Result<StudentRecord, StoreError> {
        let mut state = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        state.last_id += 1;
        let stored = record.with_id(state.last_id);
        state.records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StoreError> {
        let state = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(state.records.get(&id).cloned())
    }

    fn save(&self, record: &StudentRecord) -> Result<StudentRecord, StoreError> {
        let mut state = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        let slot = state
            .records
            .get_mut(&record.id)
            .ok_or(StoreError::Missing(record.id))?;
        *slot = record.clone();
        Ok(record.clone())
    }
}

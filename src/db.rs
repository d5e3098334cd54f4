use crate::error::StoreError;
use crate::record::{NewStudentRecord, StudentRecord};
use crate::schema::students;
use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        configure_connection(conn, self.busy_timeout_ms).map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn establish_pool(
    database_url: &str,
    max_size: u32,
    busy_timeout_ms: u64,
) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions { busy_timeout_ms }));

    // every in-memory connection is a separate empty database
    let builder = if is_in_memory(database_url) {
        builder.max_size(1).max_lifetime(None).idle_timeout(None)
    } else {
        builder.max_size(max_size)
    };
    Ok(builder.build(manager)?)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.contains("mode=memory")
}

pub fn configure_connection(conn: &mut SqliteConnection, busy_timeout_ms: u64) -> QueryResult<()> {
    conn.batch_execute(&format!("PRAGMA busy_timeout = {busy_timeout_ms};"))?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")?;
    conn.batch_execute("PRAGMA synchronous = NORMAL;")?;
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| StoreError::Migration(e.to_string()))
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudentRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub section: String,
    pub gender: String,
    pub mark1: i32,
    pub mark2: i32,
    pub mark3: i32,
    pub total: i32,
    pub average: f64,
    pub outcome: String,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = students)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub section: String,
    pub gender: String,
    pub mark1: i32,
    pub mark2: i32,
    pub mark3: i32,
    pub total: i32,
    pub average: f64,
    pub outcome: String,
}

impl From<&NewStudentRecord> for StudentFields {
    fn from(record: &NewStudentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            date_of_birth: record.date_of_birth,
            section: record.section.to_string(),
            gender: record.gender.to_string(),
            mark1: record.mark1,
            mark2: record.mark2,
            mark3: record.mark3,
            total: record.total,
            average: record.average,
            outcome: record.outcome.to_string(),
        }
    }
}

impl From<&StudentRecord> for StudentFields {
    fn from(record: &StudentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            date_of_birth: record.date_of_birth,
            section: record.section.to_string(),
            gender: record.gender.to_string(),
            mark1: record.mark1,
            mark2: record.mark2,
            mark3: record.mark3,
            total: record.total,
            average: record.average,
            outcome: record.outcome.to_string(),
        }
    }
}

impl TryFrom<StudentRow> for StudentRecord {
    type Error = StoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let corrupt = |column: &str, value: &str| {
            StoreError::Corrupt(format!("student {}: bad {column} {value:?}", row.id))
        };

        Ok(StudentRecord {
            section: row
                .section
                .parse()
                .map_err(|_| corrupt("section", &row.section))?,
            gender: row
                .gender
                .parse()
                .map_err(|_| corrupt("gender", &row.gender))?,
            outcome: row
                .outcome
                .parse()
                .map_err(|_| corrupt("outcome", &row.outcome))?,
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            mark1: row.mark1,
            mark2: row.mark2,
            mark3: row.mark3,
            total: row.total,
            average: row.average,
        })
    }
}

pub fn insert_student(
    conn: &mut SqliteConnection,
    fields: &StudentFields,
) -> QueryResult<StudentRow> {
    use crate::schema::students::dsl::*;

    diesel::insert_into(students)
        .values(fields)
        .returning(StudentRow::as_returning())
        .get_result(conn)
}

pub fn find_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> QueryResult<Option<StudentRow>> {
    use crate::schema::students::dsl::*;

    students
        .find(student_id)
        .select(StudentRow::as_select())
        .first(conn)
        .optional()
}

pub fn update_student(
    conn: &mut SqliteConnection,
    student_id: i64,
    fields: &StudentFields,
) -> QueryResult<Option<StudentRow>> {
    use crate::schema::students::dsl::*;

    diesel::update(students.find(student_id))
        .set(fields)
        .returning(StudentRow::as_returning())
        .get_result(conn)
        .optional()
}

pub fn count_students(conn: &mut SqliteConnection) -> QueryResult<i64> {
    use crate::schema::students::dsl::*;

    students.count().get_result(conn)
}

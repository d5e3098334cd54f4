use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use student_records::clock::SystemClock;
use student_records::handler::StudentService;
use student_records::routes::routes;
use student_records::settings::{settings, StoreKind};
use student_records::store::{MemoryStore, RecordStore, SqliteStore};
use student_records::utils::{
    log_db_error, log_db_ready, log_db_status, log_server_starting, log_startup_config,
};
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("student_records=info".parse()?))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );
    set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    let s = settings();
    log_startup_config(&s.server.host, s.server.port, s.store, &s.database.url);

    let store: Arc<dyn RecordStore> = match s.store {
        StoreKind::Sqlite => {
            log_db_status("Initializing SQLite connection pool...");
            let store = SqliteStore::open(&s.database)
                .inspect_err(|e| log_db_error(&e.to_string()))
                .context("Failed to open the student database")?;
            log_db_ready();
            Arc::new(store)
        }
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };

    let service = Arc::new(StudentService::new(store, Arc::new(SystemClock)));

    let host: IpAddr = s
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid listen host {:?}", s.server.host))?;
    let addr = SocketAddr::new(host, s.server.port);

    log_server_starting(addr);
    warp::serve(routes(service)).run(addr).await;

    Ok(())
}

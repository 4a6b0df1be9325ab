//! Patitas Server - pet grooming business management backend
//!
//! Edge server for a grooming salon dashboard: appointments, clients,
//! pension (boarding), billing, cash register, coupons, marketing,
//! reports and social sharing. Data lives in memory and re-seeds at
//! startup; every local mutation is queued in a durable sync queue and
//! replayed to the cloud backend when connectivity allows.
//!
//! # Module structure
//!
//! ```text
//! patitas-server/src/
//! ├── core/          # Config, ServerState, HTTP shell
//! ├── api/           # routes and handlers, one module per page
//! ├── store/         # in-memory collections and seed data
//! ├── pension/       # boarding: occupancy rules and billing
//! ├── sync/          # offline queue, backends, worker
//! ├── printing/      # receipt rendering and printer I/O
//! └── utils/         # errors, logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod pension;
pub mod printing;
pub mod store;
pub mod sync;
pub mod utils;

pub use self::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, create the work directory and wire up logging.
pub fn setup_environment() -> std::io::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let logs_dir = config.logs_dir();
    init_logger_with_file(log_level.as_deref(), logs_dir.to_str());

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____        __  _ __
   / __ \____ _/ /_(_) /_____ ______
  / /_/ / __ `/ __/ / __/ __ `/ ___/
 / ____/ /_/ / /_/ / /_/ /_/ (__  )
/_/    \__,_/\__/_/\__/\__,_/____/
    "#
    );
}

//! Schema migration CLI for the products database.
//!
//! Reads `DATABASE_URL` and accepts the sea-orm-migration subcommands
//! (`up`, `down`, `status`, `fresh`, `refresh`, `reset`).

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

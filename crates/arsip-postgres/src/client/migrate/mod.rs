//! Embedded schema migrations.

mod client_ext;
mod migrate_result;
mod run_migration;

pub use client_ext::PgClientMigrationExt;
pub use migrate_result::MigrationResult;
pub use run_migration::run_pending_migrations;

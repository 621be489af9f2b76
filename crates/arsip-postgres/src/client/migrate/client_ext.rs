use std::future::Future;

use super::{MigrationResult, run_pending_migrations};
use crate::{PgClient, PgResult};

/// Migration capabilities of [`PgClient`].
pub trait PgClientMigrationExt {
    /// Brings the schema up to date. Safe to call on every startup.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }
}

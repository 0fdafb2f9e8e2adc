use sqlx::SqliteConnection;

/// A borrowed handle to a live database connection
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut SqliteConnection;
}

/// Provides access to external systems (currently just the database) so driven adapters
/// don't need to know where their connections come from
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

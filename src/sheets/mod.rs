mod auth;
mod client;
pub mod formatting;

use crate::error::Result;
use crate::models::SheetRow;
use async_trait::async_trait;

#[async_trait]
pub trait SheetOperations {
    /// Number of populated rows in the worksheet, header included.
    async fn row_count(&self) -> Result<usize>;

    /// Date column value of a 1-based row.
    async fn row_date(&self, row: usize) -> Result<String>;

    async fn append_row(&self, row: SheetRow) -> Result<()>;
}

/// Opens the target worksheet on demand.
#[async_trait]
pub trait SheetOpener {
    type Sheet: SheetOperations + Send + Sync;

    async fn open(&self) -> Result<Self::Sheet>;
}

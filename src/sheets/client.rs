use super::{SheetOpener, SheetOperations};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::models::SheetRow;
use crate::sheets::auth::create_and_verify_authenticator;
use async_trait::async_trait;
use google_drive3::api::DriveHub;
use google_sheets4::api::{Scope, Sheets, ValueRange};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument};

// Read and append values in spreadsheets shared with the service account
pub(crate) const SHEETS_SCOPE: Scope = Scope::Spreadsheet;

// Look up spreadsheets by name
pub(crate) const DRIVE_SCOPE: google_drive3::api::Scope = google_drive3::api::Scope::MetadataReadonly;

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
    worksheet: String,
    timeout: Duration,
}

/// Await a Google API call, failing if it takes longer than `timeout`.
async fn bounded<T, E, F>(timeout: Duration, action: &str, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| AppError::Sheets(format!("{} timed out after {:?}", action, timeout)))?
        .map_err(|e| AppError::Sheets(format!("Failed to {}: {}", action, e)))
}

/// Drive query matching a spreadsheet with exactly this name.
fn spreadsheet_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name='{}' and mimeType='application/vnd.google-apps.spreadsheet' and trashed=false",
        escaped
    )
}

/// A1 reference to a worksheet, optionally narrowed to `cells`.
fn a1_range(worksheet: &str, cells: Option<&str>) -> String {
    let quoted = format!("'{}'", worksheet.replace('\'', "''"));
    match cells {
        Some(cells) => format!("{}!{}", quoted, cells),
        None => quoted,
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsClient {
    /// Authenticate and open the first worksheet of the configured spreadsheet
    #[instrument(name = "Opening Google spreadsheet", skip_all, fields(name = %config.spreadsheet_name))]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let auth = create_and_verify_authenticator(config).await?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        let sheets_hub = Sheets::new(client.clone(), auth.clone());
        let drive_hub = DriveHub::new(client, auth);

        let spreadsheet_id =
            Self::search_spreadsheet_by_name(&drive_hub, &config.spreadsheet_name, timeout)
                .await?
                .ok_or_else(|| {
                    AppError::Sheets(format!(
                        "Spreadsheet '{}' not found or not shared with the service account",
                        config.spreadsheet_name
                    ))
                })?;

        let (worksheet, spreadsheet_url) =
            Self::first_worksheet(&sheets_hub, &spreadsheet_id, timeout).await?;
        debug!(spreadsheet_id = %spreadsheet_id, worksheet = %worksheet, "Opened spreadsheet");
        info!(url = %spreadsheet_url, "Using spreadsheet");

        Ok(Self {
            hub: sheets_hub,
            spreadsheet_id,
            worksheet,
            timeout,
        })
    }

    #[instrument(name = "Finding spreadsheet", skip(drive, timeout))]
    async fn search_spreadsheet_by_name(
        drive: &DriveHub<HttpsConnector<HttpConnector>>,
        name: &str,
        timeout: Duration,
    ) -> Result<Option<String>> {
        let query = spreadsheet_query(name);

        let (_, file_list) = bounded(
            timeout,
            "search spreadsheet",
            drive
                .files()
                .list()
                .q(&query)
                .spaces("drive")
                .page_size(1)
                .add_scope(DRIVE_SCOPE)
                .doit(),
        )
        .await?;

        let spreadsheet_id = file_list
            .files
            .and_then(|files| files.into_iter().next())
            .and_then(|file| file.id);

        Ok(spreadsheet_id)
    }

    /// Title of the first worksheet and the spreadsheet URL
    async fn first_worksheet(
        sheets: &Sheets<HttpsConnector<HttpConnector>>,
        spreadsheet_id: &str,
        timeout: Duration,
    ) -> Result<(String, String)> {
        let (_, spreadsheet) = bounded(
            timeout,
            "get spreadsheet",
            sheets
                .spreadsheets()
                .get(spreadsheet_id)
                .include_grid_data(false)
                .add_scope(SHEETS_SCOPE)
                .doit(),
        )
        .await?;

        let title = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|sheet| sheet.properties)
            .and_then(|props| props.title)
            .ok_or_else(|| AppError::Sheets("Spreadsheet has no worksheets".to_string()))?;

        let url = spreadsheet
            .spreadsheet_url
            .unwrap_or_else(|| format!("https://docs.google.com/spreadsheets/d/{}", spreadsheet_id));

        Ok((title, url))
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<serde_json::Value>>> {
        let (_, response) = bounded(
            self.timeout,
            "read values",
            self.hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, range)
                .major_dimension("ROWS")
                .add_scope(SHEETS_SCOPE)
                .doit(),
        )
        .await?;

        Ok(response.values.unwrap_or_default())
    }
}

#[async_trait]
impl SheetOpener for GoogleConfig {
    type Sheet = SheetsClient;

    async fn open(&self) -> Result<SheetsClient> {
        SheetsClient::new(self).await
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Counting rows", skip(self))]
    async fn row_count(&self) -> Result<usize> {
        // Trailing empty rows are not returned, interior ones are
        let rows = self.get_values(&a1_range(&self.worksheet, None)).await?;
        Ok(rows.len())
    }

    #[instrument(name = "Reading date cell", skip(self))]
    async fn row_date(&self, row: usize) -> Result<String> {
        if row == 0 {
            return Err(AppError::Sheets("Row numbers start at 1".to_string()));
        }

        let cell = format!("A{}", row);
        let rows = self
            .get_values(&a1_range(&self.worksheet, Some(&cell)))
            .await?;

        let date = rows
            .first()
            .and_then(|r| r.first())
            .map(cell_text)
            .unwrap_or_default();

        Ok(date)
    }

    #[instrument(name = "Appending row", skip_all, fields(date = %row.date()))]
    async fn append_row(&self, row: SheetRow) -> Result<()> {
        let range = a1_range(&self.worksheet, None);
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![row.into_values()]),
        };

        bounded(
            self.timeout,
            "append row",
            self.hub
                .spreadsheets()
                .values_append(value_range, &self.spreadsheet_id, &range)
                .value_input_option("RAW")
                .insert_data_option("INSERT_ROWS")
                .add_scope(SHEETS_SCOPE)
                .doit(),
        )
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spreadsheet_query() {
        assert_eq!(
            spreadsheet_query("Workout Metrics"),
            "name='Workout Metrics' and mimeType='application/vnd.google-apps.spreadsheet' and trashed=false"
        );
        assert!(spreadsheet_query("Mathias' Runs").starts_with(r"name='Mathias\' Runs'"));
    }

    #[test]
    fn test_a1_range() {
        assert_eq!(a1_range("Sheet1", None), "'Sheet1'");
        assert_eq!(a1_range("Sheet1", Some("A12")), "'Sheet1'!A12");
        assert_eq!(a1_range("Bob's log", Some("A1")), "'Bob''s log'!A1");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("5/10/2021")), "5/10/2021");
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!(44326)), "44326");
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let err = bounded(
            Duration::from_millis(10),
            "read values",
            std::future::pending::<std::result::Result<(), String>>(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("timed out"), "got {}", err);
    }

    #[tokio::test]
    async fn test_bounded_maps_errors() {
        let err = bounded(Duration::from_secs(1), "append row", async {
            Err::<(), _>("quota exceeded")
        })
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Google Sheets API error: Failed to append row: quota exceeded"
        );
    }
}

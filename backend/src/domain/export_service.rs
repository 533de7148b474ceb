//! CSV export of the Uang Saku ledger.

use chrono::Local;
use shared::{format_rupiah, ListQuery, UangSakuTransaction};
use tracing::{error, info};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

pub const UANG_SAKU_CSV_HEADER: [&str; 8] = [
    "id", "tanggal", "id_santri", "nama_santri", "keterangan", "jenis", "nominal", "status",
];

/// A rendered CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

#[derive(Clone)]
pub struct ExportService {
    transactions: Store<UangSakuTransaction>,
}

impl ExportService {
    pub fn new(transactions: Store<UangSakuTransaction>) -> Self {
        Self { transactions }
    }

    /// Export the transactions matching the query's search term, oldest first.
    /// Paging is ignored; the file always holds every match.
    pub async fn export_uang_saku_csv(&self, query: &ListQuery) -> AdminResult<CsvExport> {
        info!("Exporting uang saku transactions: search={:?}", query.search);

        let snapshot = self.transactions.snapshot().await;
        let mut rows: Vec<&UangSakuTransaction> = shared::filter_items(&snapshot, query.search_term());
        rows.sort_by_key(|tx| (tx.date, tx.id));

        let content = render_csv(&rows).map_err(|e| {
            error!("Failed to render uang saku CSV: {}", e);
            AdminError::Export(e.to_string())
        })?;

        let export = CsvExport {
            filename: format!("uang_saku_{}.csv", Local::now().format("%Y%m%d")),
            content,
            row_count: rows.len(),
        };
        info!("Exported {} uang saku transactions as {}", export.row_count, export.filename);
        Ok(export)
    }
}

fn render_csv(rows: &[&UangSakuTransaction]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(UANG_SAKU_CSV_HEADER)?;

    for tx in rows {
        writer.write_record([
            tx.id.to_string(),
            tx.date.format("%Y-%m-%d").to_string(),
            tx.santri_id.to_string(),
            tx.santri_name.clone(),
            tx.description.clone(),
            tx.kind.as_str().to_string(),
            format_rupiah(tx.amount),
            tx.status.as_str().to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

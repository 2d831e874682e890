//! Dataset writers. Both formats share [`header`] and [`row_cells`], so the
//! column order is identical.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use carscrape_core::{ListingRecord, COLUMNS};
use carscrape_scraper::CompletionStats;
use rust_xlsxwriter::{Format, Workbook};

const ERROR_COLUMN: &str = "error";
const SHEET_NAME: &str = "listings";

fn has_failures(records: &[ListingRecord]) -> bool {
    records.iter().any(ListingRecord::is_failed)
}

/// Column names; `error` is appended only when some record failed.
pub(crate) fn header(records: &[ListingRecord]) -> Vec<&'static str> {
    let mut header = COLUMNS.to_vec();
    if has_failures(records) {
        header.push(ERROR_COLUMN);
    }
    header
}

fn row_cells(record: &ListingRecord, with_error: bool) -> Vec<&str> {
    let mut row = record.row();
    if with_error {
        row.push(record.error().unwrap_or_default());
    }
    row
}

/// Writes `records` as UTF-8 CSV with a header row.
pub(crate) fn write_csv<W: Write>(writer: W, records: &[ListingRecord]) -> anyhow::Result<()> {
    let header = header(records);
    let with_error = header.len() > COLUMNS.len();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&header)?;
    for record in records {
        csv.write_record(row_cells(record, with_error))?;
    }
    csv.flush()?;
    Ok(())
}

pub(crate) fn write_csv_file(path: &Path, records: &[ListingRecord]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, records).with_context(|| format!("failed to write {}", path.display()))
}

pub(crate) fn write_xlsx_file(path: &Path, records: &[ListingRecord]) -> anyhow::Result<()> {
    let header = header(records);
    let with_error = header.len() > COLUMNS.len();
    let bold = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in header.iter().enumerate() {
        sheet.write_string_with_format(0, u16::try_from(col)?, *name, &bold)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = u32::try_from(i + 1)?;
        for (col, value) in row_cells(record, with_error).into_iter().enumerate() {
            sheet.write_string(row, u16::try_from(col)?, value)?;
        }
    }
    sheet.set_freeze_panes(1, 0)?;

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub(crate) fn write_stats_json(path: &Path, stats: &CompletionStats) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use carscrape_core::Field;

    use super::*;

    fn csv_string(records: &[ListingRecord]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> ListingRecord {
        let mut record = ListingRecord::new("https://x.az/cars/1");
        record.set_if_empty(Field::Phone, "(050) 123-45-67");
        record.set_if_empty(Field::Owner, "Rauf");
        record.set_if_empty(Field::Brand, "Toyota");
        record.set_if_empty(Field::Price, "45 000 AZN");
        record
    }

    #[test]
    fn header_starts_with_phone_owner_url() {
        let out = csv_string(&[sample()]);
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("phone,owner,url,brand,model,price,"));
        assert!(first.ends_with("views,updated,listing_id"));
    }

    #[test]
    fn no_error_column_when_every_record_succeeded() {
        let out = csv_string(&[sample()]);
        assert!(!out.lines().next().unwrap().contains("error"));
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), COLUMNS.len());
        assert!(row.starts_with("(050) 123-45-67,Rauf,https://x.az/cars/1,Toyota,,45 000 AZN,"));
    }

    #[test]
    fn error_column_blank_for_successful_rows() {
        let records = vec![sample(), ListingRecord::failed("https://x.az/cars/2", "HTTP 500")];
        let out = csv_string(&records);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].ends_with(",listing_id,error"));
        assert!(lines[1].ends_with(','));
        assert!(lines[2].starts_with(",,https://x.az/cars/2,"));
        assert!(lines[2].ends_with(",HTTP 500"));
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let mut record = ListingRecord::new("u");
        record.set_if_empty(Field::Model, "Camry, Hybrid");
        let out = csv_string(&[record]);
        assert!(out.contains("\"Camry, Hybrid\""));
    }

    #[test]
    fn empty_dataset_is_header_only() {
        let out = csv_string(&[]);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn header_matches_record_row_width() {
        let failed = [ListingRecord::failed("u", "x")];
        assert_eq!(header(&failed).len(), row_cells(&failed[0], true).len());
    }
}

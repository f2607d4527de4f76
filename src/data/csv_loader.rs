use crate::data::table::Table;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::info;

/// Pick `;` for files whose header line uses it (common for German
/// exports where `,` is the decimal separator), `,` otherwise.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Load a CSV file into a Table. The first record is the header row;
/// rows may have fewer or more cells than there are headers.
pub fn load_csv_to_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let mut file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut first_line = String::new();
    BufReader::new(&mut file).read_line(&mut first_line)?;
    file.seek(SeekFrom::Start(0))?;

    let table = load_csv_from_reader(file, sniff_delimiter(&first_line))
        .with_context(|| format!("Failed to parse CSV file: {:?}", path.as_ref()))?;

    info!(target: "system", "Loaded {} rows x {} columns from {}",
        table.row_count(), table.column_count(), path.as_ref().display());
    Ok(table)
}

pub fn load_csv_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Land;CO2;Anteil"), b';');
        assert_eq!(sniff_delimiter("land,co2"), b',');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_load_semicolon_file_with_ragged_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Land;CO2 (Mt)\nDeutschland;675,4\nMalta").unwrap();
        file.flush().unwrap();

        let table = load_csv_to_table(file.path()).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].cell_text(1), "675,4");
        assert_eq!(table.rows()[1].cells().len(), 1);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_csv_to_table("/nonexistent/emissions.csv").unwrap_err();
        assert!(err.to_string().contains("emissions.csv"));
    }
}

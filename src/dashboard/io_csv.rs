// Primitives for reading CSV survey exports.

use crate::dashboard::*;

pub fn read_csv_table(path: &str) -> BDashResult<ParsedTable> {
    let raw = fs::read(path).context(OpeningFileSnafu { path })?;
    read_csv_from(raw.as_slice(), simplify_file_name(path).as_str())
}

/// Reads a survey table from CSV content. The first line with any content
/// is the header. Records that fail to parse are skipped with a warning so
/// one bad export line does not take the whole dataset down.
pub fn read_csv_from<R: std::io::Read>(reader: R, origin: &str) -> BDashResult<ParsedTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    // Column names with their position in the file.
    let mut columns: Vec<(usize, String)> = Vec::new();
    let mut header_len: usize = 0;
    let mut seen_header = false;
    let mut rows: Vec<SurveyRow> = Vec::new();

    for (idx, record_r) in rdr.records().enumerate() {
        let recno = idx + 1;
        let record = match record_r {
            Ok(record) => record,
            Err(e) => {
                warn!("read_csv_from: {}: skipping record {}: {}", origin, recno, e);
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if !seen_header {
            header_len = record.len();
            for (col, field) in record.iter().enumerate() {
                let name = field.trim();
                if name.is_empty() {
                    warn!(
                        "read_csv_from: {}: column {} has no name, ignored",
                        origin,
                        col + 1
                    );
                } else {
                    columns.push((col, name.to_string()));
                }
            }
            seen_header = true;
            continue;
        }
        if record.len() > header_len {
            warn!(
                "read_csv_from: {}: record {} has {} cells for {} columns, extra cells ignored",
                origin,
                recno,
                record.len(),
                header_len
            );
        }
        let mut row = SurveyRow::new();
        for (col, name) in &columns {
            let cell = match record.get(*col) {
                None => CellValue::Empty,
                Some(field) if field.trim().is_empty() => CellValue::Empty,
                Some(field) => CellValue::Text(field.to_string()),
            };
            row.set(name, cell);
        }
        rows.push(row);
    }

    if !seen_header {
        return EmptyTableSnafu { path: origin }.fail().map_err(Into::into);
    }
    debug!(
        "read_csv_from: {}: {} columns, {} rows",
        origin,
        columns.len(),
        rows.len()
    );
    Ok(ParsedTable {
        columns: columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

// Primitives for reading Excel survey exports.

use calamine::DataType;

use crate::dashboard::*;

pub fn read_xlsx_table(path: &str, worksheet: Option<&str>) -> DashResult<ParsedTable> {
    let wrange = get_range(path, worksheet)?;
    table_from_range(&wrange, simplify_file_name(path).as_str())
}

/// Walks a worksheet range the way the CSV reader walks records: the first
/// row with any content is the header, blank rows are skipped, and cells
/// keep their numeric form when Excel stored them as numbers.
pub fn table_from_range(
    wrange: &calamine::Range<DataType>,
    origin: &str,
) -> DashResult<ParsedTable> {
    let mut rows_iter = wrange.rows();
    let header = rows_iter
        .by_ref()
        .find(|row| row.iter().any(|cell| !is_blank(cell)))
        .context(EmptyTableSnafu { path: origin })?;
    debug!("table_from_range: {}: header: {:?}", origin, header);

    let mut columns: Vec<(usize, String)> = Vec::new();
    for (col, cell) in header.iter().enumerate() {
        match render_header_cell(cell) {
            Some(name) => columns.push((col, name)),
            None => warn!(
                "table_from_range: {}: column {} has no name, ignored",
                origin,
                col + 1
            ),
        }
    }

    let mut rows: Vec<SurveyRow> = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        let rowno = idx + 2;
        if row.iter().all(is_blank) {
            continue;
        }
        let mut out = SurveyRow::new();
        for (col, name) in &columns {
            let cell = match row.get(*col) {
                Some(cell) => convert_cell(cell, origin, rowno),
                None => CellValue::Empty,
            };
            out.set(name, cell);
        }
        rows.push(out);
    }

    debug!(
        "table_from_range: {}: {} columns, {} rows",
        origin,
        columns.len(),
        rows.len()
    );
    Ok(ParsedTable {
        columns: columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn render_header_cell(cell: &DataType) -> Option<String> {
    let text = match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(x) => format!("{}", x),
        DataType::Float(x) if x.fract() == 0.0 => format!("{}", *x as i64),
        DataType::Float(x) => format!("{}", x),
        DataType::Bool(b) => format!("{}", b),
        _ => String::new(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn convert_cell(cell: &DataType, origin: &str, rowno: usize) -> CellValue {
    match cell {
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(x) => CellValue::Number(*x),
        DataType::Int(x) => CellValue::Number(*x as f64),
        DataType::Empty => CellValue::Empty,
        DataType::Bool(b) => {
            warn!(
                "convert_cell: {}: row {}: boolean cell kept as text",
                origin, rowno
            );
            CellValue::Text(format!("{}", b))
        }
        DataType::DateTime(x) => {
            warn!(
                "convert_cell: {}: row {}: date cell kept as a raw number",
                origin, rowno
            );
            CellValue::Number(*x)
        }
        DataType::Error(e) => {
            warn!(
                "convert_cell: {}: row {}: error cell {:?} read as empty",
                origin, rowno, e
            );
            CellValue::Empty
        }
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> DashResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx_table: path: {:?} worksheet: {:?}",
        path, worksheet
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyTableSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_xlsx_table: path: {:?} single worksheet: {:?}",
                    path, worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => whatever!(
                "Workbook {} has several worksheets, pass --excel-worksheet-name to pick one",
                path
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_range() -> calamine::Range<DataType> {
        let mut wrange = calamine::Range::new((0, 0), (3, 2));
        wrange.set_value((0, 0), DataType::String("Hall".to_string()));
        wrange.set_value((0, 1), DataType::String(" Score ".to_string()));
        // (0, 2) left empty: an unnamed column.
        wrange.set_value((1, 0), DataType::String("Pine Hall".to_string()));
        wrange.set_value((1, 1), DataType::Float(4.0));
        wrange.set_value((1, 2), DataType::String("stray".to_string()));
        // Row 2 left blank entirely.
        wrange.set_value((3, 0), DataType::String("Oak Hall".to_string()));
        wrange.set_value((3, 1), DataType::Int(5));
        wrange
    }

    #[test]
    fn worksheet_rows_become_survey_rows() {
        let _ = env_logger::try_init();
        let table = table_from_range(&sample_range(), "test").unwrap();
        assert_eq!(table.columns, vec!["Hall", "Score"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cell("Score"), Some(&CellValue::Number(4.0)));
        assert_eq!(table.rows[1].cell("Score"), Some(&CellValue::Number(5.0)));
        assert_eq!(
            table.rows[1].trimmed("Hall"),
            Some("Oak Hall".to_string())
        );
    }

    #[test]
    fn an_all_blank_range_is_an_error() {
        let wrange: calamine::Range<DataType> = calamine::Range::new((0, 0), (1, 1));
        let err = table_from_range(&wrange, "blank.xlsx").unwrap_err();
        assert!(err.to_string().contains("blank.xlsx"));
    }

    #[test]
    fn odd_cell_types_degrade_instead_of_failing() {
        let mut wrange = calamine::Range::new((0, 0), (1, 1));
        wrange.set_value((0, 0), DataType::String("Hall".to_string()));
        wrange.set_value((0, 1), DataType::String("Flag".to_string()));
        wrange.set_value((1, 0), DataType::String("Pine Hall".to_string()));
        wrange.set_value((1, 1), DataType::Bool(true));
        let table = table_from_range(&wrange, "test").unwrap();
        assert_eq!(
            table.rows[0].cell("Flag"),
            Some(&CellValue::Text("true".to_string()))
        );
    }
}

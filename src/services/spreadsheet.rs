//! Reading uploaded CSV/XLSX files into rows of named cells.

use calamine::{Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Xlsx,
}

impl UploadKind {
    /// Only `.csv` and `.xlsx` uploads are accepted.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(UploadKind::Csv),
            "xlsx" => Some(UploadKind::Xlsx),
            _ => None,
        }
    }
}

/// Fails the whole file.
#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("file has no header row")]
    MissingHeader,
}

/// Fails a single row; the rest of the file is still imported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("malformed record: {0}")]
    Record(String),

    #[error("column `{column}` holds a spreadsheet error ({detail})")]
    InvalidCell { column: String, detail: String },

    #[error("column `{column}` is not a whole number: {value}")]
    NotANumber { column: String, value: String },

    #[error("column `{column}` must not be negative: {value}")]
    Negative { column: String, value: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Invalid(String),
}

impl CellValue {
    fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::from_text(s),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::Error(e) => CellValue::Invalid(format!("{:?}", e)),
            other => CellValue::Text(other.to_string()),
        }
    }
}

pub type RowResult = Result<SheetRow, RowError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: HashMap<String, CellValue>,
}

impl SheetRow {
    fn from_cells(headers: &[String], values: impl Iterator<Item = CellValue>) -> Self {
        let cells = headers
            .iter()
            .zip(values)
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.clone(), value))
            .collect();
        Self { cells }
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Empty)
    }

    /// Missing or empty cells read as `""`.
    pub fn text(&self, column: &str) -> Result<String, RowError> {
        match self.get(column) {
            CellValue::Empty => Ok(String::new()),
            CellValue::Text(s) => Ok(s.clone()),
            CellValue::Number(n) => Ok(format_number(*n)),
            CellValue::Invalid(detail) => Err(RowError::InvalidCell {
                column: column.to_string(),
                detail: detail.clone(),
            }),
        }
    }

    /// Missing or empty cells read as `0`; fractions are truncated.
    pub fn non_negative_int(&self, column: &str) -> Result<i32, RowError> {
        let not_a_number = |value: String| RowError::NotANumber {
            column: column.to_string(),
            value,
        };

        let value = match self.get(column) {
            CellValue::Empty => return Ok(0),
            CellValue::Number(n) => truncate(*n).ok_or_else(|| not_a_number(n.to_string()))?,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                match trimmed.parse::<i64>() {
                    Ok(v) => v,
                    Err(_) => trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(truncate)
                        .ok_or_else(|| not_a_number(s.clone()))?,
                }
            }
            CellValue::Invalid(detail) => {
                return Err(RowError::InvalidCell {
                    column: column.to_string(),
                    detail: detail.clone(),
                })
            }
        };

        if value < 0 {
            return Err(RowError::Negative {
                column: column.to_string(),
                value,
            });
        }
        i32::try_from(value).map_err(|_| not_a_number(value.to_string()))
    }
}

fn truncate(n: f64) -> Option<i64> {
    if n.is_finite() && n.abs() < i64::MAX as f64 {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

/// Spreadsheets store every number as a float; `9876543210.0` should read
/// back as `9876543210`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub fn parse(kind: UploadKind, data: &[u8]) -> Result<Vec<RowResult>, SpreadsheetError> {
    match kind {
        UploadKind::Csv => parse_csv(data),
        UploadKind::Xlsx => parse_xlsx(data),
    }
}

fn parse_csv(data: &[u8]) -> Result<Vec<RowResult>, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(SpreadsheetError::MissingHeader);
    }

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|r| SheetRow::from_cells(&headers, r.iter().map(CellValue::from_text)))
                .map_err(|e| RowError::Record(e.to_string()))
        })
        .collect();
    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<RowResult>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(SpreadsheetError::MissingHeader)?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(SpreadsheetError::MissingHeader);
    }

    let rows = rows
        .filter(|cells| !cells.iter().all(|c| matches!(c, Data::Empty)))
        .map(|cells| Ok(SheetRow::from_cells(&headers, cells.iter().map(CellValue::from))))
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_csv_and_xlsx_names() {
        assert_eq!(UploadKind::from_filename("people.csv"), Some(UploadKind::Csv));
        assert_eq!(UploadKind::from_filename("People.XLSX"), Some(UploadKind::Xlsx));
        assert_eq!(UploadKind::from_filename("data.txt"), None);
        assert_eq!(UploadKind::from_filename("legacy.xls"), None);
        assert_eq!(UploadKind::from_filename("csv"), None);
    }

    #[test]
    fn csv_rows_are_keyed_by_header() {
        let data = b"name,email,experience_years\nAsha,asha@example.com,4\n";
        let rows = parse(UploadKind::Csv, data).unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.text("name").unwrap(), "Asha");
        assert_eq!(row.non_negative_int("experience_years").unwrap(), 4);
    }

    #[test]
    fn missing_columns_default() {
        let data = b"name\nAsha\n";
        let rows = parse(UploadKind::Csv, data).unwrap();
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.text("phone").unwrap(), "");
        assert_eq!(row.non_negative_int("experience_years").unwrap(), 0);
    }

    #[test]
    fn bad_numbers_fail_the_row() {
        let data = b"name,experience_years\nA,seven\nB,-1\nC,2.0\n";
        let rows = parse(UploadKind::Csv, data).unwrap();
        let years: Vec<_> = rows
            .iter()
            .map(|r| r.as_ref().unwrap().non_negative_int("experience_years"))
            .collect();
        assert!(matches!(years[0], Err(RowError::NotANumber { .. })));
        assert!(matches!(years[1], Err(RowError::Negative { value: -1, .. })));
        assert_eq!(years[2], Ok(2));
    }

    #[test]
    fn empty_csv_has_no_header() {
        assert!(matches!(
            parse(UploadKind::Csv, b""),
            Err(SpreadsheetError::MissingHeader)
        ));
    }

    #[test]
    fn invalid_xlsx_bytes_fail_the_file() {
        assert!(parse(UploadKind::Xlsx, b"definitely not a zip").is_err());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(format_number(9876543210.0), "9876543210");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn error_cells_fail_text_and_number_reads() {
        let row = SheetRow::from_cells(
            &["email".to_string()],
            vec![CellValue::Invalid("Div0".into())].into_iter(),
        );
        assert!(matches!(row.text("email"), Err(RowError::InvalidCell { .. })));
        assert!(row.non_negative_int("email").is_err());
    }
}

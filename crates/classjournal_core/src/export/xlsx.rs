use super::{ExportError, ExportRow};
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use std::path::Path;

const MAX_COLUMN_WIDTH: u32 = 255;

/// Writes header plus rows to a single-sheet workbook at `path`.
pub(super) fn write_workbook(
    path: &Path,
    sheet_name: &str,
    header: &[String],
    widths: &[usize],
    rows: &[ExportRow],
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (index, key) in header.iter().enumerate() {
        let col = u16::try_from(index).map_err(|_| ExportError::TooManyColumns(header.len()))?;
        worksheet.write_string(0, col, key.as_str())?;

        let width = widths
            .get(index)
            .and_then(|width| u32::try_from(*width).ok())
            .unwrap_or(MAX_COLUMN_WIDTH)
            .min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col, f64::from(width))?;
    }

    for (row_index, row) in rows.iter().enumerate() {
        let excel_row = u32::try_from(row_index + 1)
            .map_err(|_| ExportError::TooManyRows(rows.len()))?;
        for (index, key) in header.iter().enumerate() {
            let col =
                u16::try_from(index).map_err(|_| ExportError::TooManyColumns(header.len()))?;
            match row.get(key) {
                None | Some(Value::Null) => {}
                Some(Value::Bool(flag)) => {
                    worksheet.write_boolean(excel_row, col, *flag)?;
                }
                Some(Value::Number(number)) => match number.as_f64() {
                    Some(value) => {
                        worksheet.write_number(excel_row, col, value)?;
                    }
                    None => {
                        worksheet.write_string(excel_row, col, number.to_string())?;
                    }
                },
                Some(Value::String(text)) => {
                    worksheet.write_string(excel_row, col, text.as_str())?;
                }
                Some(other) => {
                    worksheet.write_string(excel_row, col, other.to_string())?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

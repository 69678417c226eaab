//! XLSX rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::table::TableGrid;
use crate::traits::RenderStrategy;
use calamine::{Reader, Xlsx};
use pdfpress_core::{ConvertError, InputFormat};
use std::io::Cursor;

/// Renders `.xlsx` workbooks as padded text tables in the table font.
///
/// Every worksheet is rendered in workbook order. When a workbook has more
/// than one sheet, each table is preceded by a `Sheet: <name>` heading and
/// a blank separator line.
pub struct XlsxStrategy;

struct Sheet {
    name: String,
    grid: TableGrid,
}

impl XlsxStrategy {
    fn parse(input: &[u8]) -> Result<Vec<Sheet>, ConvertError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(input))
            .map_err(|e| ConvertError::MalformedInput(format!("invalid XLSX: {e}")))?;

        let names = workbook.sheet_names().to_owned();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                ConvertError::MalformedInput(format!("invalid XLSX sheet {name:?}: {e}"))
            })?;
            let mut grid = TableGrid::new();
            for row in range.rows() {
                grid.push_row(row.iter().map(ToString::to_string).collect());
            }
            sheets.push(Sheet { name, grid });
        }
        Ok(sheets)
    }
}

impl RenderStrategy for XlsxStrategy {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Xlsx]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let sheets = Self::parse(input)?;
        let mut pager = LinePager::new(PageFont::Courier, options.table_font_size, options);
        let labelled = sheets.len() > 1;
        for (i, sheet) in sheets.iter().enumerate() {
            if labelled {
                if i > 0 {
                    pager.push_line("");
                }
                pager.push_line(&format!("Sheet: {}", sheet.name));
            }
            for line in sheet.grid.to_lines() {
                pager.push_line(&line);
            }
        }
        pager.finish()
    }
}

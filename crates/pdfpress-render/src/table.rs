//! Plain-text table layout shared by the tabular strategies.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use pdfpress_core::ConvertError;

/// A rectangular grid of cell text, laid out as left-aligned columns
/// padded to the widest cell in each column.
#[derive(Debug, Default)]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Format the grid as one text line per row. Ragged rows are padded
    /// with empty cells up to the widest row.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let mut line = String::new();
                for (i, width) in widths.iter().enumerate() {
                    let cell = row.get(i).map_or("", String::as_str);
                    if i + 1 == columns {
                        // Last column is not padded, keeping lines short.
                        line.push_str(cell);
                    } else {
                        let pad = width - cell.chars().count();
                        line.push_str(cell);
                        line.extend(std::iter::repeat(' ').take(pad + 2));
                    }
                }
                while line.ends_with(' ') {
                    line.pop();
                }
                line
            })
            .collect()
    }

    /// Render the grid into a monospaced PDF.
    pub fn render(&self, options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let mut pager = LinePager::new(PageFont::Courier, options.table_font_size, options);
        for line in self.to_lines() {
            pager.push_line(&line);
        }
        pager.finish()
    }
}

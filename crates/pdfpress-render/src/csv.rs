//! CSV rendering.

use crate::options::RenderOptions;
use crate::table::TableGrid;
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};

/// Renders `.csv` uploads as a padded text table in the table font.
///
/// Headers are not treated specially; every record becomes one row. Ragged
/// records are accepted and padded out to the widest row.
pub struct CsvStrategy;

impl CsvStrategy {
    fn parse(input: &[u8]) -> Result<TableGrid, ConvertError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(input);

        let mut grid = TableGrid::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| ConvertError::MalformedInput(format!("invalid CSV: {e}")))?;
            grid.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(grid)
    }
}

impl RenderStrategy for CsvStrategy {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Csv]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        Self::parse(input)?.render(options)
    }
}

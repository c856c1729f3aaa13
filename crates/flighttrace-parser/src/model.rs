use polars::prelude::*;

/// A telemetry table exactly as it came out of the source file: author-supplied header names
/// and nullable text cells. Canonicalization and typing happen downstream.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub reader: &'static str,
    pub df: DataFrame,
}

impl RawTable {
    pub fn new(reader: &'static str, df: DataFrame) -> Self {
        Self { reader, df }
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Text values of a column, `None` for blank cells.
    pub fn text_column(&self, name: &str) -> Result<Vec<Option<String>>, PolarsError> {
        let values = self.df.column(name)?.str()?;
        Ok(values
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect())
    }
}

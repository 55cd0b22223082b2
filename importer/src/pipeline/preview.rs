use common::model::asset::PreviewRecord;
use common::model::category::CategoryRecord;
use common::model::csv::ValidationError;
use std::collections::HashSet;

/// What a caller shows before the user confirms an import.
#[derive(Debug, Clone, Default)]
pub struct ImportPreview {
    pub records: Vec<PreviewRecord>,
    pub errors: Vec<ValidationError>,
    pub new_categories: Vec<CategoryRecord>,
    pub(crate) sample_size: usize,
}

impl ImportPreview {
    fn rejected_rows(&self) -> HashSet<usize> {
        self.errors.iter().map(|e| e.row).collect()
    }

    pub fn has_errors(&self, row: usize) -> bool {
        self.errors.iter().any(|e| e.row == row)
    }

    pub fn errors_for_row(&self, row: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.row == row)
    }

    /// Rows with at least one error; a row with three errors counts once.
    pub fn error_row_count(&self) -> usize {
        self.rejected_rows().len()
    }

    /// Records that will survive commit.
    pub fn valid_count(&self) -> usize {
        let rejected = self.rejected_rows();
        self.records
            .iter()
            .filter(|r| !rejected.contains(&r.row))
            .count()
    }

    pub fn new_category_count(&self) -> usize {
        self.new_categories.len()
    }

    /// `false` when committing would import nothing. Commit is still allowed.
    pub fn has_importable_rows(&self) -> bool {
        self.valid_count() > 0
    }

    /// The first few records, each paired with whether its row has errors.
    pub fn sample(&self) -> Vec<(&PreviewRecord, bool)> {
        self.records
            .iter()
            .take(self.sample_size)
            .map(|r| (r, self.has_errors(r.row)))
            .collect()
    }
}

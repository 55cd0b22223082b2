//! The stage machine that sequences one import.
//!
//! An `ImportPipeline` owns everything derived from the file currently being
//! imported and nothing else. Each transition consumes the previous stage's
//! output:
//!
//! 1.  **Load** (`load_text`, `load_source`, `load_file`): any stage →
//!     `Tokenized`. Whatever was in flight is discarded first.
//! 2.  **Suggest** (`suggest_mappings`): `Tokenized` → `Mapped`, with keyword
//!     defaults the caller may then edit through `set_mapping`.
//! 3.  **Preview** (`preview`): `Mapped` → `Previewed`. Refused, leaving the
//!     pipeline in `Mapped`, when a required field has no column.
//! 4.  **Commit** (`commit`): `Previewed` → `Committed`, handing the outcome to
//!     the caller. Nothing from the file is retained afterwards.
//!
//! `reset` cancels from any stage. Calls made in the wrong stage fail with
//! `ImportError::InvalidTransition` and change nothing.

use crate::config::ImportSettings;
use crate::error::{ImportError, Result};
use crate::pipeline::preview::ImportPreview;
use crate::services::csv::commit::{commit_records, id_source_for, IdSource, ImportOutcome};
use crate::services::csv::mapping::{missing_required, suggest_mappings};
use crate::services::csv::reconcile::reconcile_categories;
use crate::services::csv::tokenize::tokenize;
use crate::services::csv::validate::validate_rows;
use crate::source::{read_source, SourceFile};
use common::jobs::ImportStage;
use common::model::category::CategoryRecord;
use common::model::csv::{ColumnMapping, TokenizedCsv};
use common::model::schema::{AssetField, TargetSchema};
use common::requests::MappingUpdate;
use log::{info, warn};
use std::path::Path;

enum ImportState {
    Empty,
    Tokenized {
        csv: TokenizedCsv,
    },
    Mapped {
        csv: TokenizedCsv,
        mapping: ColumnMapping,
    },
    Previewed {
        preview: ImportPreview,
    },
    Committed,
}

impl ImportState {
    fn stage(&self) -> ImportStage {
        match self {
            ImportState::Empty => ImportStage::Empty,
            ImportState::Tokenized { .. } => ImportStage::Tokenized,
            ImportState::Mapped { .. } => ImportStage::Mapped,
            ImportState::Previewed { .. } => ImportStage::Previewed,
            ImportState::Committed => ImportStage::Committed,
        }
    }
}

pub struct ImportPipeline {
    schema: TargetSchema,
    settings: ImportSettings,
    state: ImportState,
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

impl ImportPipeline {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            schema: TargetSchema::assets(),
            settings,
            state: ImportState::Empty,
        }
    }

    pub fn schema(&self) -> &TargetSchema {
        &self.schema
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn stage(&self) -> ImportStage {
        self.state.stage()
    }

    fn invalid(&self, action: &'static str) -> ImportError {
        ImportError::InvalidTransition {
            action,
            stage: self.stage(),
        }
    }

    /// Discards all in-flight state. Nothing is produced.
    pub fn reset(&mut self) {
        if self.stage() != ImportStage::Empty {
            info!("import reset from stage {}", self.stage());
        }
        self.state = ImportState::Empty;
    }

    /// Starts a new import from raw text.
    ///
    /// # Errors
    /// `EmptyInput` when the text has no non-blank line; the pipeline is then
    /// `Empty`.
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        self.reset();
        let csv = tokenize(text)?;
        info!(
            "loaded {} columns and {} data rows",
            csv.headers.len(),
            csv.rows.len()
        );
        self.state = ImportState::Tokenized { csv };
        Ok(())
    }

    /// Starts a new import from an already-acquired file.
    pub fn load_source(&mut self, source: &SourceFile) -> Result<()> {
        info!("importing {} (md5 {})", source.file_name, source.md5);
        self.load_text(&source.text)
    }

    /// Reads `path` and starts a new import from it. Any failure leaves the
    /// pipeline `Empty`.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.reset();
        let source = read_source(path, &self.settings).await?;
        self.load_source(&source)
    }

    /// The tokenized file, while one is loaded and not yet previewed.
    pub fn tokenized(&self) -> Option<&TokenizedCsv> {
        match &self.state {
            ImportState::Tokenized { csv } | ImportState::Mapped { csv, .. } => Some(csv),
            _ => None,
        }
    }

    /// Proposes a field for every column and moves to `Mapped`.
    pub fn suggest_mappings(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, ImportState::Empty) {
            ImportState::Tokenized { csv } => {
                let mapping = suggest_mappings(&self.schema, csv.columns());
                self.state = ImportState::Mapped { csv, mapping };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("suggest mappings"))
            }
        }
    }

    pub fn mapping(&self) -> Option<&ColumnMapping> {
        match &self.state {
            ImportState::Mapped { mapping, .. } => Some(mapping),
            _ => None,
        }
    }

    /// Points every column titled `header` at `field` (`None` to ignore it).
    pub fn set_mapping(&mut self, header: &str, field: Option<AssetField>) -> Result<()> {
        let ImportState::Mapped { mapping, .. } = &mut self.state else {
            return Err(self.invalid("edit mappings"));
        };
        if mapping.set(header, field) {
            Ok(())
        } else {
            Err(ImportError::UnknownHeader(header.to_string()))
        }
    }

    pub fn apply_update(&mut self, update: MappingUpdate) -> Result<()> {
        self.set_mapping(&update.header, update.field)
    }

    /// Required fields the current mapping leaves without a column. Empty
    /// outside `Mapped`, where no mapping is being edited.
    pub fn missing_required(&self) -> Vec<AssetField> {
        match &self.state {
            ImportState::Mapped { mapping, .. } => missing_required(&self.schema, mapping),
            _ => Vec::new(),
        }
    }

    /// Validates every row, reconciles categories against `known` and moves
    /// to `Previewed`.
    ///
    /// # Errors
    /// `MissingMappings` naming every unmapped required field; the pipeline
    /// stays `Mapped` so the caller can fix the mapping and retry.
    pub fn preview(&mut self, known: &[CategoryRecord]) -> Result<()> {
        let ImportState::Mapped { csv, mapping } = &self.state else {
            return Err(self.invalid("preview"));
        };

        let report = match validate_rows(&self.schema, csv, mapping) {
            Ok(report) => report,
            Err(e) => {
                warn!("preview blocked: {}", e);
                return Err(e);
            }
        };
        let new_categories = reconcile_categories(
            &report.referenced_categories,
            known,
            &self.settings.imported_group,
        );

        let preview = ImportPreview {
            records: report.records,
            errors: report.errors,
            new_categories,
            sample_size: self.settings.preview_sample_size,
        };
        info!(
            "preview ready: {} to import, {} rows with errors, {} new categories",
            preview.valid_count(),
            preview.error_row_count(),
            preview.new_category_count()
        );
        self.state = ImportState::Previewed { preview };
        Ok(())
    }

    pub fn preview_result(&self) -> Option<&ImportPreview> {
        match &self.state {
            ImportState::Previewed { preview } => Some(preview),
            _ => None,
        }
    }

    /// Finalizes the preview with ids from the configured strategy.
    pub fn commit(&mut self) -> Result<ImportOutcome> {
        let mut ids = id_source_for(self.settings.id_strategy);
        self.commit_with(ids.as_mut())
    }

    /// Finalizes the preview with ids from `ids`.
    pub fn commit_with(&mut self, ids: &mut dyn IdSource) -> Result<ImportOutcome> {
        match std::mem::replace(&mut self.state, ImportState::Committed) {
            ImportState::Previewed { preview } => Ok(commit_records(
                &preview.records,
                &preview.errors,
                &preview.new_categories,
                ids,
            )),
            other => {
                self.state = other;
                Err(self.invalid("commit"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Item Name,Cost,Cat\nWidget,19.99,gadgets\n";

    fn mapped() -> ImportPipeline {
        let mut pipeline = ImportPipeline::default();
        pipeline.load_text(SAMPLE).unwrap();
        pipeline.suggest_mappings().unwrap();
        pipeline
    }

    #[test]
    fn stages_advance_in_order() {
        let mut pipeline = ImportPipeline::default();
        assert_eq!(pipeline.stage(), ImportStage::Empty);
        pipeline.load_text(SAMPLE).unwrap();
        assert_eq!(pipeline.stage(), ImportStage::Tokenized);
        pipeline.suggest_mappings().unwrap();
        assert_eq!(pipeline.stage(), ImportStage::Mapped);
        pipeline.preview(&[]).unwrap();
        assert_eq!(pipeline.stage(), ImportStage::Previewed);
        pipeline.commit().unwrap();
        assert_eq!(pipeline.stage(), ImportStage::Committed);
        assert!(pipeline.preview_result().is_none());
    }

    #[test]
    fn out_of_order_calls_change_nothing() {
        let mut pipeline = mapped();
        assert!(matches!(
            pipeline.commit(),
            Err(ImportError::InvalidTransition {
                stage: ImportStage::Mapped,
                ..
            })
        ));
        assert_eq!(pipeline.stage(), ImportStage::Mapped);
        assert!(pipeline.suggest_mappings().is_err());
        assert_eq!(pipeline.stage(), ImportStage::Mapped);
    }

    #[test]
    fn mappings_cannot_change_after_preview() {
        let mut pipeline = mapped();
        pipeline.preview(&[]).unwrap();
        assert!(pipeline.set_mapping("Cost", None).is_err());
    }

    #[test]
    fn gate_keeps_pipeline_mapped() {
        let mut pipeline = mapped();
        pipeline.set_mapping("Cost", None).unwrap();
        let err = pipeline.preview(&[]).unwrap_err();
        assert!(matches!(err, ImportError::MissingMappings(ref f) if f == &vec![AssetField::Value]));
        assert_eq!(pipeline.stage(), ImportStage::Mapped);

        pipeline
            .apply_update(MappingUpdate {
                header: "Cost".to_string(),
                field: Some(AssetField::Value),
            })
            .unwrap();
        assert!(pipeline.missing_required().is_empty());
        pipeline.preview(&[]).unwrap();
    }

    #[test]
    fn missing_required_is_only_reported_while_mapping() {
        let mut pipeline = ImportPipeline::default();
        assert!(pipeline.missing_required().is_empty());
        pipeline.load_text("Name,Zzz\nWidget,1\n").unwrap();
        assert!(pipeline.missing_required().is_empty());
        pipeline.suggest_mappings().unwrap();
        assert_eq!(
            pipeline.missing_required(),
            vec![AssetField::Value, AssetField::CategoryId]
        );

        let mut pipeline = mapped();
        pipeline.preview(&[]).unwrap();
        assert!(pipeline.missing_required().is_empty());
    }

    #[test]
    fn byte_order_mark_does_not_hide_the_first_header() {
        let mut pipeline = ImportPipeline::default();
        pipeline
            .load_text("\u{feff}Name,Value,Category\nA,1,x\n")
            .unwrap();
        pipeline.suggest_mappings().unwrap();
        pipeline.set_mapping("Name", Some(AssetField::Name)).unwrap();
        assert_eq!(
            pipeline.mapping().unwrap().field_for("Name"),
            Some(AssetField::Name)
        );
        assert!(pipeline.missing_required().is_empty());
    }

    #[test]
    fn unknown_headers_are_rejected() {
        let mut pipeline = mapped();
        let err = pipeline.set_mapping("Nope", Some(AssetField::Name)).unwrap_err();
        assert!(matches!(err, ImportError::UnknownHeader(_)));
    }

    #[test]
    fn loading_discards_the_previous_import() {
        let mut pipeline = mapped();
        pipeline.preview(&[]).unwrap();
        pipeline.load_text("Name,Value,Category\n").unwrap();
        assert_eq!(pipeline.stage(), ImportStage::Tokenized);
        assert_eq!(pipeline.tokenized().unwrap().headers[0], "Name");
    }

    #[test]
    fn empty_input_leaves_pipeline_empty() {
        let mut pipeline = mapped();
        assert!(matches!(
            pipeline.load_text("\n \n"),
            Err(ImportError::EmptyInput)
        ));
        assert_eq!(pipeline.stage(), ImportStage::Empty);
    }

    #[test]
    fn reset_cancels_from_any_stage() {
        let mut pipeline = mapped();
        pipeline.preview(&[]).unwrap();
        pipeline.reset();
        assert_eq!(pipeline.stage(), ImportStage::Empty);
        assert!(pipeline.commit().is_err());
    }

    #[test]
    fn imported_group_comes_from_settings() {
        let settings = ImportSettings {
            imported_group: "From CSV".to_string(),
            ..ImportSettings::default()
        };
        let mut pipeline = ImportPipeline::new(settings);
        pipeline.load_text(SAMPLE).unwrap();
        pipeline.suggest_mappings().unwrap();
        pipeline.preview(&[]).unwrap();
        let outcome = pipeline.commit().unwrap();
        assert_eq!(outcome.categories[0].group, "From CSV");
    }
}

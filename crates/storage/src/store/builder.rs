#![forbid(unsafe_code)]

use super::references::insert_reference_tx;
use super::steps::insert_step_tx;
use super::*;
use chk_core::ids::record_id;
use chk_core::names::canonical_reference_type;

/// Fluent construction of a template's steps and their references.
///
/// Each call is its own transaction; a failed call leaves the steps added
/// before it in place.
#[derive(Debug)]
pub struct TemplateBuilder<'a> {
    store: &'a mut SqliteStore,
    template_id: i64,
    current_step: Option<StepRow>,
}

impl SqliteStore {
    pub fn template_builder(&mut self, template_id: i64) -> Result<TemplateBuilder<'_>, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        {
            let tx = self.read_tx()?;
            ensure_template_exists_tx(&tx, template_id)?;
        }
        Ok(TemplateBuilder {
            store: self,
            template_id,
            current_step: None,
        })
    }
}

impl<'a> TemplateBuilder<'a> {
    /// Appends a step and makes it current.
    pub fn add_step(self, text: &str) -> Result<Self, StoreError> {
        self.insert(text, None)
    }

    /// Inserts a step at `position` and makes it current.
    pub fn add_step_at(self, text: &str, position: i64) -> Result<Self, StoreError> {
        self.insert(text, Some(position))
    }

    /// Attaches a reference to the current step.
    pub fn add_reference(self, url: &str, reference_type: &str) -> Result<Self, StoreError> {
        let Some(step_id) = self.current_step.as_ref().map(|step| step.id) else {
            return Err(StoreError::InvalidInput("add_reference requires a current step"));
        };
        let url = required_text(url, "reference url must not be empty")?;
        let canonical = canonical_reference_type(reference_type)?;

        let store = self.store;
        let stamp = Stamp::now(&store.config.modifier);
        let tx = begin_write(&mut store.conn)?;
        insert_reference_tx(&tx, step_id, &url, &canonical, stamp)?;
        tx.commit()?;

        Ok(Self {
            store,
            template_id: self.template_id,
            current_step: self.current_step,
        })
    }

    pub fn template_id(&self) -> i64 {
        self.template_id
    }

    pub fn current_step(&self) -> Option<&StepRow> {
        self.current_step.as_ref()
    }

    fn insert(self, text: &str, position: Option<i64>) -> Result<Self, StoreError> {
        let text = required_text(text, "step text must not be empty")?;

        let store = self.store;
        let stamp = Stamp::now(&store.config.modifier);
        let tx = begin_write(&mut store.conn)?;
        let step = insert_step_tx(&tx, self.template_id, &text, position, stamp)?;
        tx.commit()?;

        Ok(Self {
            store,
            template_id: self.template_id,
            current_step: Some(step),
        })
    }
}

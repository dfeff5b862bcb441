use crate::domain::model::{FieldName, FormState};
use crate::utils::error::Result;

/// Owns the raw text of the form fields.
///
/// Edits are applied immediately; `snapshot()` always reflects the latest
/// value of every field.
#[derive(Debug, Default)]
pub struct FormStateManager {
    state: FormState,
    revision: u64,
}

impl FormStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.state.set(name, value);
        self.revision += 1;
        tracing::trace!("field {} changed (revision {})", name, self.revision);
    }

    /// String-keyed variant of [`set_field`](Self::set_field) for front ends
    /// that only know field names as text.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = name.parse::<FieldName>()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn get(&self, name: FieldName) -> &str {
        self.state.get(name)
    }

    pub fn snapshot(&self) -> FormState {
        self.state.clone()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn clear(&mut self) {
        self.state = FormState::new();
        self.revision += 1;
    }

    /// Bumped on every edit; renderers compare it to decide whether to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_empty_fields() {
        let form = FormStateManager::new();
        for name in FieldName::ALL {
            assert_eq!(form.get(name), "");
        }
        assert_eq!(form.revision(), 0);
    }

    #[test]
    fn test_snapshot_reflects_last_value_per_field() {
        let mut form = FormStateManager::new();
        form.set_field(FieldName::Age, "1");
        form.set_field(FieldName::Size, "2");
        form.set_field(FieldName::Age, "10");
        form.set_field(FieldName::Location, "7");
        form.set_field(FieldName::Size, "2500");
        form.set_field(FieldName::Bedrooms, "3");

        let snapshot = form.snapshot();
        assert_eq!(snapshot.get(FieldName::Size), "2500");
        assert_eq!(snapshot.get(FieldName::Bedrooms), "3");
        assert_eq!(snapshot.get(FieldName::Age), "10");
        assert_eq!(snapshot.get(FieldName::Location), "7");
    }

    #[test]
    fn test_edit_order_across_fields_does_not_matter() {
        let edits = [
            (FieldName::Size, "900"),
            (FieldName::Bedrooms, "1"),
            (FieldName::Age, "40"),
            (FieldName::Location, "2"),
        ];

        let mut forward = FormStateManager::new();
        for (name, value) in edits {
            forward.set_field(name, value);
        }

        let mut backward = FormStateManager::new();
        for (name, value) in edits.into_iter().rev() {
            backward.set_field(name, value);
        }

        assert_eq!(forward.snapshot(), backward.snapshot());
    }

    #[test]
    fn test_editing_one_field_leaves_others_alone() {
        let mut form = FormStateManager::new();
        form.set_field(FieldName::Size, "2500");
        form.set_field(FieldName::Bedrooms, "3");

        let before = form.snapshot();
        form.set_field(FieldName::Age, "12");
        let after = form.snapshot();

        assert_eq!(before.get(FieldName::Size), after.get(FieldName::Size));
        assert_eq!(before.get(FieldName::Bedrooms), after.get(FieldName::Bedrooms));
        assert_eq!(after.get(FieldName::Location), "");
        assert_eq!(form.revision(), 3);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut form = FormStateManager::new();
        form.set_field(FieldName::Size, "100");
        let snapshot = form.snapshot();
        form.set_field(FieldName::Size, "200");

        assert_eq!(snapshot.get(FieldName::Size), "100");
        assert_eq!(form.get(FieldName::Size), "200");
    }

    #[test]
    fn test_set_field_by_name() {
        let mut form = FormStateManager::new();
        form.set_field_by_name("bedrooms", "4").unwrap();
        assert_eq!(form.get(FieldName::Bedrooms), "4");
        assert!(form.set_field_by_name("price", "1").is_err());
        assert_eq!(form.revision(), 1);
    }

    #[test]
    fn test_clear_resets_every_field() {
        let mut form = FormStateManager::new();
        form.set_field(FieldName::Size, "1");
        form.set_field(FieldName::Location, "9");
        form.clear();
        assert!(form.state().is_blank());
    }
}

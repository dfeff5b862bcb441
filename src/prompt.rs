use crate::core::prediction_form::PredictionForm;
use crate::domain::model::FieldName;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Ask for every field that is still empty, one line per field.
///
/// Input is stored as typed (minus the line ending); nothing is validated.
/// Stops quietly at end of input.
pub fn prompt_missing_fields<R: BufRead, W: Write>(
    form: &mut PredictionForm,
    mut input: R,
    mut output: W,
) -> Result<()> {
    for name in FieldName::ALL {
        if !form.field(name).is_empty() {
            continue;
        }

        write!(output, "{} ({}): ", name.label(), name.placeholder())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("stdin closed before {} was entered", name);
            break;
        }
        form.set_field(name, line.trim_end_matches(['\r', '\n']));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PredictionRequest, PredictionResult};
    use crate::domain::ports::PredictionService;
    use crate::utils::error::PredictError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Unused;

    #[async_trait]
    impl PredictionService for Unused {
        async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResult> {
            Err(PredictError::Service { status: 500 })
        }
    }

    #[test]
    fn test_prompts_only_for_empty_fields() {
        let mut form = PredictionForm::new(Arc::new(Unused));
        form.set_field(FieldName::Bedrooms, "3");

        let mut output = Vec::new();
        prompt_missing_fields(&mut form, "2500\n10\r\n7\n".as_bytes(), &mut output).unwrap();

        let prompts = String::from_utf8(output).unwrap();
        assert!(prompts.contains("Square Footage (e.g. 2500): "));
        assert!(!prompts.contains("Bedrooms"));
        assert_eq!(form.field(FieldName::Size), "2500");
        assert_eq!(form.field(FieldName::Bedrooms), "3");
        assert_eq!(form.field(FieldName::Age), "10");
        assert_eq!(form.field(FieldName::Location), "7");
    }

    #[test]
    fn test_stops_at_end_of_input() {
        let mut form = PredictionForm::new(Arc::new(Unused));
        prompt_missing_fields(&mut form, "1200\n".as_bytes(), Vec::new()).unwrap();

        assert_eq!(form.field(FieldName::Size), "1200");
        assert_eq!(form.field(FieldName::Bedrooms), "");
    }

    #[test]
    fn test_keeps_text_as_typed() {
        let mut form = PredictionForm::new(Arc::new(Unused));
        prompt_missing_fields(&mut form, " abc \n\n\n\n".as_bytes(), Vec::new()).unwrap();

        assert_eq!(form.field(FieldName::Size), " abc ");
        assert_eq!(form.field(FieldName::Bedrooms), "");
    }
}

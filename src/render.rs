//! Plain-text rendering of a prediction form for terminal front ends.

use crate::core::orchestrator::RequestLifecycle;
use crate::core::prediction_form::FormView;
use crate::domain::model::PredictionResult;
use crate::utils::error::Result;
use std::fmt::Write;

pub const TITLE: &str = "House Price Prediction";
pub const SUBTITLE: &str = "Estimate property value using advanced machine learning models";

pub fn render(view: &FormView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", SUBTITLE);
    out.push('\n');

    for (name, value) in view.fields.iter() {
        if value.is_empty() {
            let _ = writeln!(out, "  {:<22} ({})", name.label(), name.placeholder());
        } else {
            let _ = writeln!(out, "  {:<22} {}", name.label(), value);
        }
    }
    out.push('\n');

    match view.lifecycle {
        RequestLifecycle::Idle => {
            let _ = writeln!(out, "[ Generate Prediction ]");
        }
        RequestLifecycle::Pending => {
            let _ = writeln!(out, "[ Processing... ]");
        }
        RequestLifecycle::Succeeded(result) => {
            let _ = writeln!(out, "[ Generate Prediction ]");
            out.push('\n');
            out.push_str(&render_result(result));
        }
        RequestLifecycle::Failed(message) => {
            let _ = writeln!(out, "[ Generate Prediction ]");
            out.push('\n');
            let _ = writeln!(out, "⚠️  {}", message);
        }
    }

    out
}

/// Best-model banner followed by one card per row, in the order received.
pub fn render_result(result: &PredictionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Best Model Recommendation: {}", result.best_model);

    for row in &result.comparison {
        out.push('\n');
        let _ = writeln!(out, "  {}", row.model);
        let _ = writeln!(out, "    {}", row.prediction);
        let _ = writeln!(out, "    {}", row.performance);
    }

    out
}

pub fn render_json(view: &FormView<'_>) -> Result<String> {
    let value = match view.lifecycle {
        RequestLifecycle::Succeeded(result) => serde_json::json!({
            "status": view.lifecycle.name(),
            "result": result,
        }),
        RequestLifecycle::Failed(message) => serde_json::json!({
            "status": view.lifecycle.name(),
            "error": message,
        }),
        other => serde_json::json!({ "status": other.name() }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

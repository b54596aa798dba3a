//! Template evaluator
//!
//! Substitutes a concrete thickness into a template. Evaluation never
//! mutates the template and keeps every command kind as written.

use crate::command::{Contour, Template};
use crate::parser::parse_template;
use lasersvg_core::{Error, Result, TemplateError};

/// Evaluate every expression of `template` at `thickness`.
///
/// Any finite thickness is accepted, zero and negative values included.
pub fn materialize(template: &Template, thickness: f64) -> std::result::Result<Contour, TemplateError> {
    if !thickness.is_finite() {
        return Err(TemplateError::InvalidThickness { value: thickness });
    }

    template
        .iter()
        .enumerate()
        .map(|(index, command)| {
            command.try_map(|arg| {
                let value = arg.evaluate(thickness);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(TemplateError::TemplateEvalError {
                        index,
                        reason: format!("'{}' evaluates to {}", arg, value),
                    })
                }
            })
        })
        .collect()
}

/// Parse template text and evaluate it at `thickness`.
///
/// An expression that cannot be read fails with
/// [`TemplateError::TemplateEvalError`] naming the command index; no partial
/// contour is produced.
pub fn materialize_str(text: &str, thickness: f64) -> Result<Contour> {
    let template = parse_template(text).map_err(|err| match err {
        Error::Template(TemplateError::TemplateCorruption {
            index,
            text,
            reason,
        }) => Error::Template(TemplateError::TemplateEvalError {
            index,
            reason: format!("cannot evaluate '{}': {}", text, reason),
        }),
        other => other,
    })?;
    Ok(materialize(&template, thickness)?)
}

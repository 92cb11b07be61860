//! Evaluation of typed distances from the numeric entry field.
//!
//! Users may type plain numbers (`250`), a decimal comma (`12,5`) or small
//! formulas referring to the anchored box (`w/2 - 18`).

use evalexpr::{build_operator_tree, ContextWithMutableVariables, HashMapContext, Value};
use thiserror::Error;

use crate::CabinetBox;

/// Errors for a typed distance that cannot become a guide offset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceInputError {
    #[error("empty distance input")]
    Empty,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("evaluation error: {0}")]
    Evaluation(String),
    #[error("expected a number, got {0}")]
    InvalidType(String),
    /// NaN, infinite or zero
    #[error("distance must be finite and non-zero, got {0}")]
    Degenerate(f64),
}

/// Box dimensions exposed to formulas as `width`/`height`/`depth` (and `w`/`h`/`d`)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceVariables {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl DistanceVariables {
    pub fn from_box(cabinet: &CabinetBox) -> Self {
        Self {
            width: Some(cabinet.width),
            height: Some(cabinet.height),
            depth: Some(cabinet.depth),
        }
    }
}

/// Evaluate a typed distance. The result keeps its sign; zero, NaN and
/// infinities are rejected.
pub fn evaluate_distance(
    input: &str,
    vars: &DistanceVariables,
) -> Result<f64, DistanceInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DistanceInputError::Empty);
    }

    // "12,5" is a decimal, not an evalexpr tuple
    let expression = promote_integer_literals(&trimmed.replace(',', "."));

    let mut context = HashMapContext::new();
    let bindings = [
        (["width", "w"], vars.width),
        (["height", "h"], vars.height),
        (["depth", "d"], vars.depth),
    ];
    for (names, value) in bindings {
        if let Some(v) = value {
            for name in names {
                context
                    .set_value(name.to_string(), Value::Float(v))
                    .map_err(|e| DistanceInputError::Evaluation(e.to_string()))?;
            }
        }
    }
    context
        .set_value("PI".to_string(), Value::Float(std::f64::consts::PI))
        .ok();
    context
        .set_value("E".to_string(), Value::Float(std::f64::consts::E))
        .ok();

    let tree = build_operator_tree(&expression)
        .map_err(|e| DistanceInputError::Parse(e.to_string()))?;
    let value = tree
        .eval_with_context(&context)
        .map_err(|e| DistanceInputError::Evaluation(e.to_string()))?;

    let number = match value {
        Value::Float(f) => f,
        Value::Int(i) => i as f64,
        other => return Err(DistanceInputError::InvalidType(format!("{other:?}"))),
    };

    if !number.is_finite() || number == 0.0 {
        return Err(DistanceInputError::Degenerate(number));
    }
    Ok(number)
}

/// Rewrite bare integer literals as floats so `601/2` is 300.5 instead of
/// evalexpr's integer division.
fn promote_integer_literals(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let starts_word = i == 0 || !(chars[i - 1].is_alphanumeric() || chars[i - 1] == '_' || chars[i - 1] == '.');
        if c.is_ascii_digit() && starts_word {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.extend(&chars[start..i]);
            let next = chars.get(i).copied();
            let is_integer = !matches!(next, Some(n) if n == '.' || n.is_alphanumeric() || n == '_');
            if is_integer {
                out.push_str(".0");
            }
            continue;
        }
        out.push(c);
        i += 1;
    }

    out
}

//! Normalizer — recovers an `AnalysisResult` from free-form model output.
//!
//! Handles fenced (```json ... ```) and bare responses. Parsing is strict: any
//! syntax error, missing field, wrong type, unknown `roleFocus`, or broken list
//! invariant is a `ParseError`. Nothing is coerced or truncated.

use std::collections::HashSet;

use thiserror::Error;

use crate::analysis::models::AnalysisResult;

const FENCE: &str = "```";
const MAX_KEYWORDS: usize = 10;
const MAX_TECH_STACK: usize = 5;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not a valid analysis object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("analysis violates its contract: {0}")]
    Invalid(String),
}

pub fn normalize(raw_text: &str) -> Result<AnalysisResult, ParseError> {
    let body = strip_code_fence(raw_text);
    let result: AnalysisResult = serde_json::from_str(body)?;
    check_contract(&result)?;
    Ok(result)
}

/// Returns the payload between the first pair of fences when the text opens
/// with one, minus a leading `json` tag. Unfenced text is only trimmed.
fn strip_code_fence(raw_text: &str) -> &str {
    let text = raw_text.trim();
    if !text.starts_with(FENCE) {
        return text;
    }

    let segment = text.split(FENCE).nth(1).unwrap_or_default();
    segment.strip_prefix("json").unwrap_or(segment).trim()
}

fn check_contract(result: &AnalysisResult) -> Result<(), ParseError> {
    let count = result.keywords.len();
    if count == 0 || count > MAX_KEYWORDS {
        return Err(ParseError::Invalid(format!(
            "expected 1-{MAX_KEYWORDS} keywords, got {count}"
        )));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = result.keywords.iter().find(|k| !seen.insert(k.as_str())) {
        return Err(ParseError::Invalid(format!("duplicate keyword '{dup}'")));
    }

    if result.project_description.trim().is_empty() {
        return Err(ParseError::Invalid(
            "projectDescription is empty".to_string(),
        ));
    }

    if result.tech_stack.len() > MAX_TECH_STACK {
        return Err(ParseError::Invalid(format!(
            "expected at most {MAX_TECH_STACK} techStack entries, got {}",
            result.tech_stack.len()
        )));
    }

    Ok(())
}

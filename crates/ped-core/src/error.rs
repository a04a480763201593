use thiserror::Error;

/// Errors raised while setting up pedestrians and their behaviors.
///
/// Only configuration problems are errors. Degenerate inputs (no eligible regions, empty groups)
/// produce degenerate results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PedError {
    #[error("knowledge degree must be in [0,1], got {0}")]
    InvalidKnowledgeDegree(f32),

    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("unknown region {0}")]
    UnknownRegion(u32),
}

pub type Result<T> = std::result::Result<T, PedError>;

/// Fails unless `value` is finite and strictly positive.
pub fn require_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PedError::InvalidConfig {
            field,
            value,
            reason: "must be a positive finite number",
        })
    }
}

/// Fails unless `degree` lies in `[0, 1]` (NaN included).
pub fn check_knowledge_degree(degree: f32) -> Result<()> {
    if (0.0..=1.0).contains(&degree) {
        Ok(())
    } else {
        Err(PedError::InvalidKnowledgeDegree(degree))
    }
}

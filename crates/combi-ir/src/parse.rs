use crate::types::MatrixDef;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_matrix(json: &str) -> Result<MatrixDef, ParseError> {
    Ok(serde_json::from_str(json)?)
}

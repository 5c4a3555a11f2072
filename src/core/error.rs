//! 변환기 공통 에러 타입

use std::path::PathBuf;
use thiserror::Error;

/// 변환 과정에서 발생하는 모든 실패
///
/// 형상 전제조건, weight 이외 항목, 심볼 구조 오류도 패닉 없이 이 타입으로 반환된다.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 파라미터 컨테이너 바이너리 구조 오류
    #[error("invalid params container: {0}")]
    Container(String),

    #[error("unknown dtype flag {0}")]
    UnknownDType(i32),

    #[error("entry '{name}' has dtype {dtype}, only float32 weights can be binarized")]
    UnsupportedDType { name: String, dtype: String },

    /// 필터에 걸렸지만 weight 항목이 아님
    #[error("entry '{name}' matched a binarized layer but only weight binarization is supported")]
    UnsupportedEntry { name: String },

    #[error("entry '{name}' with shape {shape:?} cannot be packed into {word_bits}-bit words: {reason}")]
    ShapePrecondition {
        name: String,
        shape: Vec<usize>,
        word_bits: u32,
        reason: &'static str,
    },

    #[error("word width must be 32 or 64 bits, got {0}")]
    InvalidWordWidth(u32),

    #[error("cannot derive symbol file name from '{file_name}': expected <prefix>-<suffix>.<ext>")]
    NamingConvention { file_name: String },

    #[error("malformed symbol json: {0}")]
    Json(#[from] serde_json::Error),

    /// 심볼 문서 구조 검증 실패
    #[error("symbol structure: {0}")]
    Structural(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

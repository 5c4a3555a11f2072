//! 입력 파라미터 경로로부터 출력 경로 유도
//!
//! `dir/<prefix>-0000.params` 이면 심볼은 `dir/<prefix>-symbol.json`,
//! 출력은 둘 다 같은 디렉토리에 `binarized_` 접두사를 붙인다.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::error::{ConvertError, Result};

pub const OUTPUT_PREFIX: &str = "binarized_";
pub const SYMBOL_SUFFIX: &str = "-symbol.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPaths {
    pub params_in: PathBuf,
    pub params_out: PathBuf,
    pub symbol_in: PathBuf,
    pub symbol_out: PathBuf,
}

impl ConversionPaths {
    /// `symbol_override`가 없으면 파일 이름에 `-`가 있어야 한다
    pub fn derive(params: &Path, symbol_override: Option<&Path>) -> Result<Self> {
        let params_name = file_name_of(params)?;
        let dir = parent_dir(params);
        let params_out = dir.join(prefixed(&[params_name]));

        let (symbol_in, symbol_out) = match symbol_override {
            Some(symbol) => {
                let out = parent_dir(symbol).join(prefixed(&[file_name_of(symbol)?]));
                (symbol.to_path_buf(), out)
            }
            None => {
                let base = base_os_name(params_name)?;
                let mut symbol_name = base.clone();
                symbol_name.push(SYMBOL_SUFFIX);
                (
                    dir.join(&symbol_name),
                    dir.join(prefixed(&[base.as_os_str(), OsStr::new(SYMBOL_SUFFIX)])),
                )
            }
        };

        Ok(Self {
            params_in: params.to_path_buf(),
            params_out,
            symbol_in,
            symbol_out,
        })
    }
}

/// 마지막 `-` 앞까지
pub fn base_name(file_name: &str) -> Result<&str> {
    file_name
        .rfind('-')
        .map(|i| &file_name[..i])
        .ok_or_else(|| ConvertError::NamingConvention {
            file_name: file_name.to_string(),
        })
}

/// 바이트 그대로 자른다. UTF-8이 아닌 이름도 손실 없이 유지
fn base_os_name(file_name: &OsStr) -> Result<OsString> {
    if let Some(name) = file_name.to_str() {
        return base_name(name).map(OsString::from);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;

        let bytes = file_name.as_bytes();
        if let Some(i) = bytes.iter().rposition(|&b| b == b'-') {
            return Ok(OsStr::from_bytes(&bytes[..i]).to_os_string());
        }
    }

    Err(ConvertError::NamingConvention {
        file_name: file_name.to_string_lossy().into_owned(),
    })
}

fn prefixed(parts: &[&OsStr]) -> OsString {
    let mut name = OsString::from(OUTPUT_PREFIX);
    for part in parts {
        name.push(part);
    }
    name
}

fn file_name_of(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| ConvertError::NamingConvention {
        file_name: path.display().to_string(),
    })
}

// dirname처럼 빈 부모는 "."
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

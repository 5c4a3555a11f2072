//! # 이진화 변환기 핵심 모듈
//!
//! params 컨테이너 입출력, 부호 비트 패킹, 심볼 주석

pub mod config;
pub mod converter;
pub mod error;
pub mod params;
pub mod tensors;

// 주요 타입들 재수출
pub use config::{ConverterConfig, WordWidth};
pub use converter::*;
pub use error::{ConvertError, Result};
pub use params::{DeviceContext, ParamEntry, ParamFile};
pub use tensors::*;

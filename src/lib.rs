//! BNN 모델 변환 라이브러리
//!
//! 학습된 MXNet 체크포인트(`*.params` + `*-symbol.json`)의 QConvolution / QFullyConnected
//! 가중치를 부호 비트로 패킹하고, 런타임이 패킹된 가중치를 그대로 읽도록 심볼에 표시한다.

pub mod core;

// 핵심 모듈들 재수출
pub use crate::core::{
    // 설정 및 에러
    ConverterConfig, WordWidth, ConvertError,
    // 컨테이너와 텐서
    ParamFile, ParamEntry, DeviceContext, NdTensor, DType,
    // 변환 단계
    ConversionPaths, ConversionSummary, PackReport, AnnotateReport,
};
pub use crate::core::converter::{annotate_symbol_file, pack_params_file, run};

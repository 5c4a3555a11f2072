//! 전체 변환: 파라미터 패킹 후 심볼 주석

use log::info;

use super::graph_annotator::{annotate_symbol_file, AnnotateReport};
use super::paths::ConversionPaths;
use super::weight_packer::{pack_params_file, PackReport};
use crate::core::config::ConverterConfig;
use crate::core::error::Result;

#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub paths: ConversionPaths,
    pub params: PackReport,
    pub symbol: AnnotateReport,
}

/// 패킹이 성공해야만 심볼 주석 단계로 넘어간다
pub fn run(paths: &ConversionPaths, config: &ConverterConfig) -> Result<ConversionSummary> {
    info!(
        "binarizing with {}-bit words: {}",
        config.word_width.bits(),
        paths.params_in.display()
    );

    let params = pack_params_file(&paths.params_in, &paths.params_out, config)?;
    let symbol = annotate_symbol_file(&paths.symbol_in, &paths.symbol_out, config)?;

    Ok(ConversionSummary {
        paths: paths.clone(),
        params,
        symbol,
    })
}

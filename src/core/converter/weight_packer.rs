//! 파라미터 파일 이진화 - QConvolution / QFullyConnected 가중치를 부호 비트로 패킹

use log::{debug, info};
use std::path::Path;

use crate::core::config::{ConverterConfig, WordWidth};
use crate::core::error::{ConvertError, Result};
use crate::core::params::{DeviceContext, ParamFile};
use crate::core::tensors::{pack_signs_to_bytes, DType, NdTensor};

/// 패킹 결과 요약
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackReport {
    pub total_entries: usize,
    /// 패킹된 항목 이름 (파일 내 순서)
    pub packed: Vec<String>,
    pub bytes_before: usize,
    pub bytes_after: usize,
}

impl PackReport {
    pub fn compression_ratio(&self) -> f32 {
        if self.bytes_after == 0 {
            return 1.0;
        }
        self.bytes_before as f32 / self.bytes_after as f32
    }
}

/// 이진화 대상 항목의 인덱스
///
/// 레이어 필터에 걸린 이름은 반드시 `required_marker`를 포함해야 한다.
pub fn select_entries(file: &ParamFile, config: &ConverterConfig) -> Result<Vec<usize>> {
    let mut selected = Vec::new();
    for (index, entry) in file.entries().iter().enumerate() {
        if !config.matches_layer(&entry.name) {
            continue;
        }
        if !entry.name.contains(config.required_marker.as_str()) {
            return Err(ConvertError::UnsupportedEntry {
                name: entry.name.clone(),
            });
        }
        selected.push(index);
    }
    Ok(selected)
}

/// 텐서 하나를 1차원 패킹 워드 텐서로 변환
pub fn binarize_tensor(name: &str, tensor: &NdTensor, width: WordWidth) -> Result<NdTensor> {
    let word_bits = width.bits();
    let shape_error = |reason| ConvertError::ShapePrecondition {
        name: name.to_string(),
        shape: tensor.shape().to_vec(),
        word_bits,
        reason,
    };

    // 두 번째 차원은 이전 레이어의 입력 깊이
    if tensor.ndim() < 2 {
        return Err(shape_error("at least two dimensions are required"));
    }
    if !tensor.shape()[1].is_multiple_of(word_bits as usize) {
        return Err(shape_error("second dimension is not a multiple of the word width"));
    }

    let values = tensor.to_f32_vec().ok_or_else(|| ConvertError::UnsupportedDType {
        name: name.to_string(),
        dtype: tensor.dtype().to_string(),
    })?;

    let words = values.len() / word_bits as usize;
    let data = pack_signs_to_bytes(&values, width);
    NdTensor::new(vec![words], DType::word_carrier(width), data)
}

/// 메모리 안에서 선택된 항목을 모두 패킹한다. 실패하면 파일은 부분적으로 바뀐 채 남는다.
pub fn binarize_params(file: &mut ParamFile, config: &ConverterConfig) -> Result<PackReport> {
    let bytes_before = file.total_bytes();
    let selected = select_entries(file, config)?;

    let mut packed = Vec::with_capacity(selected.len());
    for index in selected {
        let entry = &file.entries()[index];
        info!("|- converting weights {}...", entry.name);

        let binarized = binarize_tensor(&entry.name, &entry.tensor, config.word_width)?;
        debug!(
            "   {:?} {} -> {:?} {}",
            entry.tensor.shape(),
            entry.tensor.dtype(),
            binarized.shape(),
            binarized.dtype()
        );
        packed.push(entry.name.clone());
        file.replace_tensor(index, binarized, DeviceContext::CPU);
    }

    Ok(PackReport {
        total_entries: file.len(),
        packed,
        bytes_before,
        bytes_after: file.total_bytes(),
    })
}

/// `input`을 읽어 이진화한 뒤 `output`에 기록
///
/// 모든 변환이 끝난 뒤에만 쓰므로 실패 시 출력 파일은 생기지 않는다.
pub fn pack_params_file(input: &Path, output: &Path, config: &ConverterConfig) -> Result<PackReport> {
    info!("loading {}...", input.display());
    let mut file = ParamFile::load(input)?;

    let report = binarize_params(&mut file, config)?;

    file.save(output)?;
    info!("wrote converted params to {}", output.display());
    Ok(report)
}

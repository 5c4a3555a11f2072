//! 밀집 텐서 - 형상, 타입, 원시 리틀엔디언 바이트

use super::dtype::DType;
use crate::core::error::{ConvertError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct NdTensor {
    shape: Vec<usize>,
    dtype: DType,
    data: Vec<u8>,
}

impl NdTensor {
    /// 데이터 길이가 `product(shape) * dtype.size()`와 일치해야 한다
    pub fn new(shape: Vec<usize>, dtype: DType, data: Vec<u8>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(dtype.size(), |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ConvertError::Container(format!("shape {:?} overflows", shape)))?;
        if data.len() != expected {
            return Err(ConvertError::Container(format!(
                "tensor of shape {:?} ({}) needs {} bytes, got {}",
                shape,
                dtype,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, dtype, data })
    }

    /// f32 값들로부터 생성
    pub fn from_f32(shape: Vec<usize>, values: &[f32]) -> Result<Self> {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(shape, DType::F32, data)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// f32 텐서의 값 복사본. 다른 타입이면 None
    pub fn to_f32_vec(&self) -> Option<Vec<f32>> {
        if self.dtype != DType::F32 {
            return None;
        }
        Some(
            self.data
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

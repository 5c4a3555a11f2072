//! 변환 설정

use super::error::{ConvertError, Result};

/// 패킹 워드 비트 폭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordWidth {
    #[default]
    W32,
    W64,
}

impl WordWidth {
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(WordWidth::W32),
            64 => Ok(WordWidth::W64),
            other => Err(ConvertError::InvalidWordWidth(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// 변환 설정
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// 패킹 워드 폭
    pub word_width: WordWidth,

    /// 이진화 대상 파라미터 이름에 포함되어야 하는 문자열 (대소문자 구분)
    pub layer_filters: Vec<String>,

    /// 선택된 항목이 반드시 포함해야 하는 문자열
    pub required_marker: String,

    /// 속성을 추가할 심볼 노드의 op 값
    pub graph_ops: Vec<String>,

    pub attribute_key: String,
    pub attribute_value: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            word_width: WordWidth::default(),
            layer_filters: vec!["qconvolution".to_string(), "qfullyconnected".to_string()],
            required_marker: "weight".to_string(),
            graph_ops: vec!["QConvolution".to_string(), "QFullyConnected".to_string()],
            attribute_key: "binarized_weights_only".to_string(),
            attribute_value: "True".to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn with_word_width(mut self, word_width: WordWidth) -> Self {
        self.word_width = word_width;
        self
    }

    /// 파라미터 이름이 이진화 레이어 필터에 걸리는지
    pub fn matches_layer(&self, name: &str) -> bool {
        self.layer_filters.iter().any(|f| name.contains(f.as_str()))
    }

    pub fn matches_op(&self, op: &str) -> bool {
        self.graph_ops.iter().any(|o| o == op)
    }
}

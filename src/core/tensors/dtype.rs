//! 원소 타입 태그 (MXNet type flag 호환)

use std::fmt;

use crate::core::config::WordWidth;
use crate::core::error::{ConvertError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    F32,
    F64,
    F16,
    U8,
    I32,
    I8,
    I64,
    Bool,
    I16,
    U16,
    U32,
    U64,
    BF16,
}

impl DType {
    pub fn from_flag(flag: i32) -> Result<Self> {
        let dtype = match flag {
            0 => DType::F32,
            1 => DType::F64,
            2 => DType::F16,
            3 => DType::U8,
            4 => DType::I32,
            5 => DType::I8,
            6 => DType::I64,
            7 => DType::Bool,
            8 => DType::I16,
            9 => DType::U16,
            10 => DType::U32,
            11 => DType::U64,
            12 => DType::BF16,
            other => return Err(ConvertError::UnknownDType(other)),
        };
        Ok(dtype)
    }

    pub fn flag(self) -> i32 {
        match self {
            DType::F32 => 0,
            DType::F64 => 1,
            DType::F16 => 2,
            DType::U8 => 3,
            DType::I32 => 4,
            DType::I8 => 5,
            DType::I64 => 6,
            DType::Bool => 7,
            DType::I16 => 8,
            DType::U16 => 9,
            DType::U32 => 10,
            DType::U64 => 11,
            DType::BF16 => 12,
        }
    }

    /// 원소 하나의 바이트 수
    pub fn size(self) -> usize {
        match self {
            DType::U8 | DType::I8 | DType::Bool => 1,
            DType::F16 | DType::BF16 | DType::I16 | DType::U16 => 2,
            DType::F32 | DType::I32 | DType::U32 => 4,
            DType::F64 | DType::I64 | DType::U64 => 8,
        }
    }

    /// 패킹된 워드를 담는 타입. 런타임은 같은 폭의 float 배열로 읽고 비트를 재해석한다.
    pub fn word_carrier(width: WordWidth) -> Self {
        match width {
            WordWidth::W32 => DType::F32,
            WordWidth::W64 => DType::F64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F32 => "float32",
            DType::F64 => "float64",
            DType::F16 => "float16",
            DType::U8 => "uint8",
            DType::I32 => "int32",
            DType::I8 => "int8",
            DType::I64 => "int64",
            DType::Bool => "bool",
            DType::I16 => "int16",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
            DType::BF16 => "bfloat16",
        };
        f.write_str(name)
    }
}

//! 파라미터 컨테이너 - 이름 붙은 텐서들의 순서 있는 목록

pub mod format;


use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::core::error::{ConvertError, Result};
use crate::core::tensors::NdTensor;

/// 텐서가 저장될 당시의 디바이스 (MXNet Context)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceContext {
    pub dev_type: i32,
    pub dev_id: i32,
}

impl DeviceContext {
    pub const CPU: DeviceContext = DeviceContext { dev_type: 1, dev_id: 0 };
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self::CPU
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    pub name: String,
    pub device: DeviceContext,
    pub tensor: NdTensor,
}

impl ParamEntry {
    pub fn new(name: impl Into<String>, tensor: NdTensor) -> Self {
        Self {
            name: name.into(),
            device: DeviceContext::CPU,
            tensor,
        }
    }
}

/// 순서를 보존하는 파라미터 파일. 이름은 유일하다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamFile {
    entries: Vec<ParamEntry>,
    names: HashSet<String>,
}

impl ParamFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        Self::read_from(BufReader::new(file))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| ConvertError::io(path, e))
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        format::read_param_file(&mut reader)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        format::write_param_file(writer, self)
    }

    /// 끝에 항목 추가. 중복 이름은 거부
    pub fn push(&mut self, entry: ParamEntry) -> Result<()> {
        if !self.names.insert(entry.name.clone()) {
            return Err(ConvertError::Container(format!("duplicate entry name '{}'", entry.name)));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ParamEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// 이름과 위치는 그대로 두고 텐서만 교체
    pub fn replace_tensor(&mut self, index: usize, tensor: NdTensor, device: DeviceContext) {
        let entry = &mut self.entries[index];
        entry.tensor = tensor;
        entry.device = device;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.tensor.byte_len()).sum()
    }
}

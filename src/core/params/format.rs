//! MXNet NDArray 리스트 바이너리 포맷 (`*.params`)
//!
//! ```text
//! u64 0x112 | u64 reserved | u64 n | n × NDArray | u64 k | k × (u64 len, bytes)
//! ```
//!
//! NDArray 레코드는 버전별로 다르다:
//! - V2/V3: `u32 magic, i32 stype, shape, ctx, i32 type_flag, data`
//! - V1: `u32 magic, shape, ctx, i32 type_flag, data`
//! - 레거시: 매직 없이 `u32 ndim, ndim × u32` 형상으로 시작
//!
//! 형상은 `u32 ndim` 뒤에 `ndim × i64`. ctx는 `i32 dev_type, i32 dev_id`.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::{DeviceContext, ParamEntry, ParamFile};
use crate::core::error::{ConvertError, Result};
use crate::core::tensors::{DType, NdTensor};

pub const LIST_MAGIC: u64 = 0x112;
pub const NDARRAY_V1_MAGIC: u32 = 0xF993_FAC8;
pub const NDARRAY_V2_MAGIC: u32 = 0xF993_FAC9;
pub const NDARRAY_V3_MAGIC: u32 = 0xF993_FACA;

const DENSE_STORAGE: i32 = 0;

/// io 에러를 어느 필드에서 났는지와 함께 컨테이너 에러로
fn truncated(what: &str) -> impl FnOnce(io::Error) -> ConvertError + '_ {
    move |e| ConvertError::Container(format!("failed to read {}: {}", what, e))
}

pub fn read_param_file<R: Read>(reader: &mut R) -> Result<ParamFile> {
    let header = reader.read_u64::<LittleEndian>().map_err(truncated("list header"))?;
    if header != LIST_MAGIC {
        return Err(ConvertError::Container(format!(
            "bad list magic 0x{:x}, expected 0x{:x}",
            header, LIST_MAGIC
        )));
    }
    let _reserved = reader.read_u64::<LittleEndian>().map_err(truncated("reserved"))?;

    let count = reader.read_u64::<LittleEndian>().map_err(truncated("array count"))? as usize;
    let mut arrays = Vec::with_capacity(count.min(1 << 16));
    for i in 0..count {
        let array = read_ndarray(reader)
            .map_err(|e| ConvertError::Container(format!("array #{}: {}", i, e)))?;
        arrays.push(array);
    }

    let name_count = reader.read_u64::<LittleEndian>().map_err(truncated("name count"))? as usize;
    if name_count != count {
        return Err(ConvertError::Container(format!(
            "{} arrays but {} names; anonymous lists cannot be converted",
            count, name_count
        )));
    }

    let mut file = ParamFile::default();
    for (device, tensor) in arrays {
        let name = read_string(reader)?;
        file.push(ParamEntry { name, device, tensor })?;
    }
    Ok(file)
}

fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u64::<LittleEndian>().map_err(truncated("name length"))? as usize;
    let mut buf = Vec::with_capacity(len.min(1 << 16));
    reader
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(truncated("name"))?;
    if buf.len() != len {
        return Err(ConvertError::Container("name truncated".to_string()));
    }
    String::from_utf8(buf).map_err(|e| ConvertError::Container(format!("name is not utf-8: {}", e)))
}

fn read_ndarray<R: Read>(reader: &mut R) -> Result<(DeviceContext, NdTensor)> {
    let magic = reader.read_u32::<LittleEndian>().map_err(truncated("array magic"))?;

    let shape = match magic {
        NDARRAY_V2_MAGIC | NDARRAY_V3_MAGIC => {
            let stype = reader.read_i32::<LittleEndian>().map_err(truncated("storage type"))?;
            if stype != DENSE_STORAGE {
                return Err(ConvertError::Container(format!(
                    "sparse storage type {} is not supported",
                    stype
                )));
            }
            let ndim = reader.read_i32::<LittleEndian>().map_err(truncated("ndim"))?;
            let none = if magic == NDARRAY_V2_MAGIC { ndim == 0 } else { ndim < 0 };
            if none {
                return Err(ConvertError::Container(
                    "empty (none) arrays are not supported".to_string(),
                ));
            }
            if !(0..=32).contains(&ndim) {
                return Err(ConvertError::Container(format!("invalid ndim {}", ndim)));
            }
            read_dims_i64(reader, ndim as usize)?
        }
        NDARRAY_V1_MAGIC => {
            let ndim = reader.read_u32::<LittleEndian>().map_err(truncated("ndim"))?;
            if ndim == 0 {
                return Err(ConvertError::Container(
                    "empty (none) arrays are not supported".to_string(),
                ));
            }
            if ndim > 32 {
                return Err(ConvertError::Container(format!("invalid ndim {}", ndim)));
            }
            read_dims_i64(reader, ndim as usize)?
        }
        legacy_ndim => {
            if legacy_ndim == 0 {
                return Err(ConvertError::Container(
                    "empty (none) arrays are not supported".to_string(),
                ));
            }
            if legacy_ndim > 32 {
                return Err(ConvertError::Container(format!(
                    "unrecognized array header 0x{:08x}",
                    legacy_ndim
                )));
            }
            (0..legacy_ndim)
                .map(|_| {
                    reader
                        .read_u32::<LittleEndian>()
                        .map(|d| d as usize)
                        .map_err(truncated("legacy dim"))
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    let device = DeviceContext {
        dev_type: reader.read_i32::<LittleEndian>().map_err(truncated("dev_type"))?,
        dev_id: reader.read_i32::<LittleEndian>().map_err(truncated("dev_id"))?,
    };
    let dtype = DType::from_flag(reader.read_i32::<LittleEndian>().map_err(truncated("type flag"))?)?;

    let byte_len = shape
        .iter()
        .try_fold(dtype.size(), |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| ConvertError::Container(format!("shape {:?} overflows", shape)))?;
    let mut data = Vec::with_capacity(byte_len.min(1 << 26));
    reader
        .take(byte_len as u64)
        .read_to_end(&mut data)
        .map_err(truncated("array data"))?;
    if data.len() != byte_len {
        return Err(ConvertError::Container(format!(
            "array data truncated: expected {} bytes, got {}",
            byte_len,
            data.len()
        )));
    }

    Ok((device, NdTensor::new(shape, dtype, data)?))
}

fn read_dims_i64<R: Read>(reader: &mut R, ndim: usize) -> Result<Vec<usize>> {
    (0..ndim)
        .map(|_| {
            let d = reader.read_i64::<LittleEndian>().map_err(truncated("dim"))?;
            usize::try_from(d).map_err(|_| ConvertError::Container(format!("negative dim {}", d)))
        })
        .collect()
}

pub fn write_param_file<W: Write>(writer: &mut W, file: &ParamFile) -> io::Result<()> {
    writer.write_u64::<LittleEndian>(LIST_MAGIC)?;
    writer.write_u64::<LittleEndian>(0)?;

    writer.write_u64::<LittleEndian>(file.len() as u64)?;
    for entry in file.entries() {
        write_ndarray(writer, &entry.device, &entry.tensor)?;
    }

    writer.write_u64::<LittleEndian>(file.len() as u64)?;
    for entry in file.entries() {
        writer.write_u64::<LittleEndian>(entry.name.len() as u64)?;
        writer.write_all(entry.name.as_bytes())?;
    }
    Ok(())
}

fn write_ndarray<W: Write>(writer: &mut W, device: &DeviceContext, tensor: &NdTensor) -> io::Result<()> {
    // V2에서 ndim 0은 none 배열이므로 스칼라는 V3로 기록
    let magic = if tensor.ndim() == 0 { NDARRAY_V3_MAGIC } else { NDARRAY_V2_MAGIC };
    writer.write_u32::<LittleEndian>(magic)?;
    writer.write_i32::<LittleEndian>(DENSE_STORAGE)?;

    writer.write_i32::<LittleEndian>(tensor.ndim() as i32)?;
    for &d in tensor.shape() {
        writer.write_i64::<LittleEndian>(d as i64)?;
    }

    writer.write_i32::<LittleEndian>(device.dev_type)?;
    writer.write_i32::<LittleEndian>(device.dev_id)?;
    writer.write_i32::<LittleEndian>(tensor.dtype().flag())?;
    writer.write_all(tensor.data())
}

//! 텐서 모듈 - 원소 타입, 밀집 텐서, 부호 비트 패킹

pub mod bit_pack;
pub mod dtype;
pub mod nd_tensor;


pub use bit_pack::{pack_signs, pack_signs_to_bytes, unpack_signs, unpack_signs_from_bytes, BinaryWord};
pub use dtype::DType;
pub use nd_tensor::NdTensor;

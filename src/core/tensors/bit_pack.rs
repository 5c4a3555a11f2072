//! 부호 비트 패킹
//!
//! 워드 `k`의 비트 `j` (LSB 우선)는 `values[k * BITS + j] >= 0.0`일 때 1이다.
//! NaN은 비교가 거짓이므로 0이 된다. XNOR 런타임의 `get_binary_row`와 같은 규칙.

use crate::core::config::WordWidth;

/// 부호 비트를 담는 고정 폭 워드
pub trait BinaryWord: Copy {
    const BITS: usize;

    fn zero() -> Self;
    fn with_bit(self, pos: usize) -> Self;
    fn bit(self, pos: usize) -> bool;
    fn extend_le_bytes(self, out: &mut Vec<u8>);
}

impl BinaryWord for u32 {
    const BITS: usize = 32;

    fn zero() -> Self {
        0
    }
    fn with_bit(self, pos: usize) -> Self {
        self | (1u32 << pos)
    }
    fn bit(self, pos: usize) -> bool {
        (self >> pos) & 1 == 1
    }
    fn extend_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl BinaryWord for u64 {
    const BITS: usize = 64;

    fn zero() -> Self {
        0
    }
    fn with_bit(self, pos: usize) -> Self {
        self | (1u64 << pos)
    }
    fn bit(self, pos: usize) -> bool {
        (self >> pos) & 1 == 1
    }
    fn extend_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

/// `values.len()`는 `W::BITS`의 배수여야 한다. 나머지 꼬리는 버려진다.
pub fn pack_signs<W: BinaryWord>(values: &[f32]) -> Vec<W> {
    debug_assert_eq!(values.len() % W::BITS, 0);
    values
        .chunks_exact(W::BITS)
        .map(|row| {
            row.iter()
                .enumerate()
                .fold(W::zero(), |word, (j, &v)| if v >= 0.0 { word.with_bit(j) } else { word })
        })
        .collect()
}

/// 패킹의 역방향. 크기는 복원되지 않고 +1.0 / -1.0 만 돌려준다.
pub fn unpack_signs<W: BinaryWord>(words: &[W]) -> Vec<f32> {
    let mut out = Vec::with_capacity(words.len() * W::BITS);
    for &w in words {
        for j in 0..W::BITS {
            out.push(if w.bit(j) { 1.0 } else { -1.0 });
        }
    }
    out
}

/// 워드 폭에 맞춰 패킹하고 리틀엔디언 바이트로 직렬화
pub fn pack_signs_to_bytes(values: &[f32], width: WordWidth) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() / 8);
    match width {
        WordWidth::W32 => pack_signs::<u32>(values)
            .into_iter()
            .for_each(|w| w.extend_le_bytes(&mut out)),
        WordWidth::W64 => pack_signs::<u64>(values)
            .into_iter()
            .for_each(|w| w.extend_le_bytes(&mut out)),
    }
    out
}

/// 리틀엔디언 패킹 바이트를 다시 부호 배열로
pub fn unpack_signs_from_bytes(bytes: &[u8], width: WordWidth) -> Vec<f32> {
    match width {
        WordWidth::W32 => {
            let words: Vec<u32> = bytes
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            unpack_signs(&words)
        }
        WordWidth::W64 => {
            let words: Vec<u64> = bytes
                .chunks_exact(8)
                .map(|c| {
                    let mut b = [0u8; 8];
                    b.copy_from_slice(c);
                    u64::from_le_bytes(b)
                })
                .collect();
            unpack_signs(&words)
        }
    }
}

//! 이진화 변환기
//!
//! 1. `weight_packer` - params 파일의 이진화 레이어 가중치를 비트 패킹
//! 2. `graph_annotator` - symbol JSON의 해당 노드에 속성 추가
//! 3. `pipeline` - 경로 유도 후 두 단계를 순서대로 실행

pub mod graph_annotator;
pub mod paths;
pub mod pipeline;
pub mod weight_packer;

#[cfg(test)]
mod __tests__;

pub use graph_annotator::{annotate_graph, annotate_symbol_file, AnnotateReport};
pub use paths::ConversionPaths;
pub use pipeline::{run, ConversionSummary};
pub use weight_packer::{binarize_params, binarize_tensor, pack_params_file, select_entries, PackReport};

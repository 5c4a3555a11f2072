//! 심볼 JSON 주석 - 이진화 레이어 노드에 `binarized_weights_only` 속성 추가

use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::config::ConverterConfig;
use crate::core::error::{ConvertError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotateReport {
    pub total_nodes: usize,
    /// 속성이 추가된 노드 이름
    pub annotated: Vec<String>,
}

/// 문서 안의 일치 노드마다 속성을 덮어쓴다 (last-write-wins)
///
/// 노드의 추가/삭제/재정렬은 없다. 구조 오류로 실패하면 문서는 일부만 수정된 상태일 수 있다.
pub fn annotate_graph(doc: &mut Value, config: &ConverterConfig) -> Result<AnnotateReport> {
    let nodes = doc
        .get_mut("nodes")
        .ok_or_else(|| ConvertError::Structural("missing 'nodes' field".to_string()))?
        .as_array_mut()
        .ok_or_else(|| ConvertError::Structural("'nodes' is not an array".to_string()))?;

    let mut report = AnnotateReport {
        total_nodes: nodes.len(),
        annotated: Vec::new(),
    };

    for (index, node) in nodes.iter_mut().enumerate() {
        let node = node
            .as_object_mut()
            .ok_or_else(|| ConvertError::Structural(format!("node #{} is not an object", index)))?;

        let op = node
            .get("op")
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::Structural(format!("node #{} has no string 'op'", index)))?;
        if !config.matches_op(op) {
            continue;
        }

        let name = node
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::Structural(format!("{} node #{} has no string 'name'", op, index)))?
            .to_string();

        let attr = node
            .get_mut("attr")
            .ok_or_else(|| ConvertError::Structural(format!("node '{}' has no 'attr'", name)))?
            .as_object_mut()
            .ok_or_else(|| ConvertError::Structural(format!("'attr' of node '{}' is not an object", name)))?;
        attr.insert(
            config.attribute_key.clone(),
            Value::String(config.attribute_value.clone()),
        );

        info!("|- adjusting attributes for {}", name);
        report.annotated.push(name);
    }

    Ok(report)
}

/// `input` 심볼 파일을 읽어 주석을 단 뒤 `output`에 한 줄 JSON으로 기록
pub fn annotate_symbol_file(input: &Path, output: &Path, config: &ConverterConfig) -> Result<AnnotateReport> {
    info!("loading {}...", input.display());
    let text = fs::read_to_string(input).map_err(|e| ConvertError::io(input, e))?;

    let mut doc: Value = serde_json::from_str(&text)?;
    let report = annotate_graph(&mut doc, config)?;

    let serialized = serde_json::to_string(&doc)?;
    fs::write(output, serialized).map_err(|e| ConvertError::io(output, e))?;

    info!("wrote converted json to {}", output.display());
    Ok(report)
}

//! 심볼 JSON 주석 테스트

use crate::core::config::ConverterConfig;
use crate::core::converter::graph_annotator::*;
use crate::core::error::ConvertError;
use serde_json::{json, Value};

fn annotate(doc: &mut Value) -> Result<AnnotateReport, ConvertError> {
    annotate_graph(doc, &ConverterConfig::default())
}

#[test]
fn 시나리오_qconvolution_노드에_속성_추가() {
    let mut doc: Value =
        serde_json::from_str(r#"{"nodes":[{"op":"QConvolution","name":"c0","attr":{}}]}"#).unwrap();
    let report = annotate(&mut doc).unwrap();

    assert_eq!(report.annotated, vec!["c0".to_string()]);
    assert_eq!(
        serde_json::to_string(&doc).unwrap(),
        r#"{"nodes":[{"op":"QConvolution","name":"c0","attr":{"binarized_weights_only":"True"}}]}"#
    );
}

#[test]
fn 일치하는_op만_주석_순서_보존() {
    let mut doc = json!({
        "nodes": [
            {"op": "null", "name": "data", "inputs": []},
            {"op": "QConvolution", "name": "qconv0", "attr": {"num_filter": "64", "act_bit": "1"}},
            {"op": "Convolution", "name": "conv0", "attr": {"num_filter": "64"}},
            {"op": "qconvolution", "name": "lower", "attr": {}},
            {"op": "QFullyConnected", "name": "qfc0", "attr": {"num_hidden": "10"}}
        ],
        "arg_nodes": [0],
        "heads": [[4, 0, 0]]
    });
    let before = doc.clone();

    let report = annotate(&mut doc).unwrap();
    assert_eq!(report.total_nodes, 5);
    assert_eq!(report.annotated, vec!["qconv0".to_string(), "qfc0".to_string()]);

    let nodes = doc["nodes"].as_array().unwrap();
    let old = before["nodes"].as_array().unwrap();
    for (i, (n, o)) in nodes.iter().zip(old).enumerate() {
        assert_eq!(n["name"], o["name"]);
        if i == 1 || i == 4 {
            assert_eq!(n["attr"]["binarized_weights_only"], "True");
            assert_eq!(n["attr"].as_object().unwrap().len(), o["attr"].as_object().unwrap().len() + 1);
        } else {
            assert_eq!(n, o);
        }
    }
    assert_eq!(doc["heads"], before["heads"]);

    // 기존 키 순서 뒤에 추가
    let keys: Vec<_> = nodes[1]["attr"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["num_filter", "act_bit", "binarized_weights_only"]);
}

#[test]
fn 두_번_적용해도_동일() {
    let mut doc = json!({"nodes": [{"op": "QFullyConnected", "name": "fc", "attr": {"binarized_weights_only": "False", "x": "1"}}]});
    annotate(&mut doc).unwrap();
    let once = serde_json::to_string(&doc).unwrap();
    annotate(&mut doc).unwrap();

    assert_eq!(serde_json::to_string(&doc).unwrap(), once);
    assert_eq!(once, r#"{"nodes":[{"op":"QFullyConnected","name":"fc","attr":{"binarized_weights_only":"True","x":"1"}}]}"#);
}

#[test]
fn 구조_오류는_structural() {
    let cases = vec![
        json!({}),
        json!({"nodes": {}}),
        json!({"nodes": [1]}),
        json!({"nodes": [{"name": "x", "attr": {}}]}),
        json!({"nodes": [{"op": 3, "name": "x", "attr": {}}]}),
        json!({"nodes": [{"op": "QConvolution", "name": "c0"}]}),
        json!({"nodes": [{"op": "QConvolution", "name": "c0", "attr": "none"}]}),
        json!({"nodes": [{"op": "QConvolution", "attr": {}}]}),
    ];
    for mut doc in cases {
        let shown = doc.to_string();
        assert!(
            matches!(annotate(&mut doc), Err(ConvertError::Structural(_))),
            "expected structural error for {}",
            shown
        );
    }
}

#[test]
fn 일치하지_않는_노드는_attr_없어도_통과() {
    let mut doc = json!({"nodes": [{"op": "Activation", "name": "relu"}]});
    let report = annotate(&mut doc).unwrap();
    assert!(report.annotated.is_empty());
}

#[test]
fn 파일_단위_변환() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("net-symbol.json");
    let output = dir.path().join("binarized_net-symbol.json");
    std::fs::write(
        &input,
        "{\n  \"nodes\": [\n    {\"op\": \"QConvolution\", \"name\": \"c0\", \"attr\": {}}\n  ]\n}\n",
    )
    .unwrap();

    annotate_symbol_file(&input, &output, &ConverterConfig::default()).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        r#"{"nodes":[{"op":"QConvolution","name":"c0","attr":{"binarized_weights_only":"True"}}]}"#
    );
}

#[test]
fn 입력_없거나_json_깨지면_출력_없음() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let err = annotate_symbol_file(&dir.path().join("missing.json"), &output, &ConverterConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
    assert!(!output.exists());

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"nodes\": [").unwrap();
    let err = annotate_symbol_file(&broken, &output, &ConverterConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Json(_)));
    assert!(!output.exists());
}

#[test]
fn 출력_경로에_쓸_수_없으면_io_에러() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("net-symbol.json");
    std::fs::write(&input, r#"{"nodes":[{"op":"QConvolution","name":"c0","attr":{}}]}"#).unwrap();

    let output = dir.path().join("no_dir").join("out.json");
    let err = annotate_symbol_file(&input, &output, &ConverterConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Io { ref path, .. } if path == &output));
    assert!(!output.exists());
}

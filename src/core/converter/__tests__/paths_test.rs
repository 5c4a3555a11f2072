use crate::core::converter::paths::*;
use crate::core::error::ConvertError;
use std::path::{Path, PathBuf};

#[test]
fn 표준_mxnet_이름() {
    let paths = ConversionPaths::derive(Path::new("models/resnet-18-0010.params"), None).unwrap();
    assert_eq!(paths.params_in, PathBuf::from("models/resnet-18-0010.params"));
    assert_eq!(paths.params_out, PathBuf::from("models/binarized_resnet-18-0010.params"));
    // 마지막 '-' 기준
    assert_eq!(paths.symbol_in, PathBuf::from("models/resnet-18-symbol.json"));
    assert_eq!(paths.symbol_out, PathBuf::from("models/binarized_resnet-18-symbol.json"));
}

#[test]
fn 디렉토리_없는_경로는_현재_디렉토리() {
    let paths = ConversionPaths::derive(Path::new("lenet-0001.params"), None).unwrap();
    assert_eq!(paths.params_out, PathBuf::from("./binarized_lenet-0001.params"));
    assert_eq!(paths.symbol_in, PathBuf::from("./lenet-symbol.json"));
}

#[test]
fn 하이픈_없으면_명시적_에러() {
    let err = ConversionPaths::derive(Path::new("dir/weights.params"), None).unwrap_err();
    assert!(matches!(err, ConvertError::NamingConvention { .. }));
}

#[test]
fn 심볼_경로_직접_지정() {
    let paths = ConversionPaths::derive(Path::new("a/weights.params"), Some(Path::new("b/graph.json"))).unwrap();
    assert_eq!(paths.params_out, PathBuf::from("a/binarized_weights.params"));
    assert_eq!(paths.symbol_in, PathBuf::from("b/graph.json"));
    assert_eq!(paths.symbol_out, PathBuf::from("b/binarized_graph.json"));
}

#[test]
fn base_name_규칙() {
    assert_eq!(base_name("net-0000.params").unwrap(), "net");
    assert_eq!(base_name("-0000.params").unwrap(), "");
    assert!(base_name("net.params").is_err());
}

#[cfg(unix)]
#[test]
fn utf8_아닌_이름도_바이트_보존() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let params = Path::new("d").join(OsStr::from_bytes(b"m\xFFx-0000.params"));
    let paths = ConversionPaths::derive(&params, None).unwrap();

    assert_eq!(paths.params_in, params);
    assert_eq!(
        paths.params_out,
        Path::new("d").join(OsStr::from_bytes(b"binarized_m\xFFx-0000.params"))
    );
    assert_eq!(paths.symbol_in, Path::new("d").join(OsStr::from_bytes(b"m\xFFx-symbol.json")));
    assert_eq!(
        paths.symbol_out,
        Path::new("d").join(OsStr::from_bytes(b"binarized_m\xFFx-symbol.json"))
    );

    // 하이픈이 없으면 여전히 명시적 에러
    let err = ConversionPaths::derive(&Path::new("d").join(OsStr::from_bytes(b"m\xFF.params")), None)
        .unwrap_err();
    assert!(matches!(err, ConvertError::NamingConvention { .. }));
}

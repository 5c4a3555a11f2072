use anyhow::{Context, Result};
use bnn_converter::{ConversionPaths, ConversionSummary, ConverterConfig, WordWidth};
use clap::error::ErrorKind;
use clap::{crate_version, value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use std::process;

fn cli() -> Command {
    Command::new("model-converter")
        .version(crate_version!())
        .about("MXNet 모델의 QConvolution / QFullyConnected 가중치를 부호 비트로 패킹")
        .long_about(
            "<prefix>-<epoch>.params 파일의 이진화 레이어 가중치를 워드당 32(또는 64)개씩 패킹하고,\n\
             같은 디렉토리의 <prefix>-symbol.json 노드에 binarized_weights_only 속성을 추가한다.\n\
             결과는 'binarized_' 접두사를 붙여 입력 옆에 저장된다.",
        )
        .arg(
            Arg::new("params")
                .required(true)
                .value_name("PARAMS")
                .value_parser(value_parser!(PathBuf))
                .help("MXNet *.params 파일 경로"),
        )
        .arg(
            Arg::new("word-bits")
                .long("word-bits")
                .short('w')
                .value_name("BITS")
                .value_parser(value_parser!(u32))
                .default_value("32")
                .help("패킹 워드 비트 폭 (32 또는 64)"),
        )
        .arg(
            Arg::new("symbol")
                .long("symbol")
                .short('s')
                .value_name("JSON")
                .value_parser(value_parser!(PathBuf))
                .help("심볼 파일 경로 (기본값: <prefix>-symbol.json)"),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => match usage_failure(&e) {
            // 인자 오류는 사용법을 표준 출력으로
            Some(usage) => {
                println!("{}", usage);
                process::exit(1);
            }
            None => e.exit(),
        },
    };

    match handle_convert(&matches) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("❌ 오류: {:#}", e);
            process::exit(1);
        }
    }
}

/// --help / --version 이 아닌 파싱 실패면 출력할 사용법 문자열
fn usage_failure(err: &clap::Error) -> Option<String> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => Some(format!("{}\n{}", err.render(), cli().render_usage())),
    }
}

fn handle_convert(matches: &ArgMatches) -> Result<ConversionSummary> {
    let params = matches
        .get_one::<PathBuf>("params")
        .context("missing params path")?;
    let word_bits = *matches.get_one::<u32>("word-bits").unwrap_or(&32);
    let symbol = matches.get_one::<PathBuf>("symbol");

    let word_width = WordWidth::from_bits(word_bits)?;
    let config = ConverterConfig::default().with_word_width(word_width);
    let paths = ConversionPaths::derive(params, symbol.map(PathBuf::as_path))
        .with_context(|| format!("cannot locate outputs for {}", params.display()))?;

    let summary = bnn_converter::run(&paths, &config)
        .with_context(|| format!("conversion of {} failed", params.display()))?;
    Ok(summary)
}

fn print_summary(summary: &ConversionSummary) {
    println!("\n🏆 변환 완료!");
    println!(
        "   파라미터: {}/{} 항목 패킹 ({:.1}:1)",
        summary.params.packed.len(),
        summary.params.total_entries,
        summary.params.compression_ratio()
    );
    println!(
        "   심볼: {}/{} 노드 주석",
        summary.symbol.annotated.len(),
        summary.symbol.total_nodes
    );
    println!("   출력: {}", summary.paths.params_out.display());
    println!("         {}", summary.paths.symbol_out.display());
}

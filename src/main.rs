use clap::Parser;

use meteor_flux_viewer::query::{format_number, FluxQuery, OutputMode};
use meteor_flux_viewer::{app, astro, config, fetch, i18n};

/// MetRec 플럭스 서비스 질의 CLI. 위치 인자 세 개(shower begin end)를 주면
/// 한 번만 질의하고, 없으면 대화형 메뉴를 연다.
#[derive(Parser, Debug)]
#[command(name = "meteor_flux_viewer_cli", version, about = "Meteor shower flux query tool")]
struct Cli {
    /// 유성우 코드 (예: PER)
    shower: Option<String>,
    /// 시작 시각 (예: 2011-04-21 18:00:00)
    begin: Option<String>,
    /// 종료 시각
    end: Option<String>,

    /// 구간당 최소 유성 수
    #[arg(short = 'm', long, default_value_t = 20)]
    min_meteors: u64,
    /// 구간당 최소 ECA [1000 km²·h]
    #[arg(short = 'e', long, default_value_t = 0)]
    min_eca: u64,
    /// 최소 구간 길이 [h]
    #[arg(short = 'i', long, default_value_t = 1.0)]
    min_interval: f64,
    /// 최대 구간 길이 [h]
    #[arg(short = 'j', long, default_value_t = 24.0)]
    max_interval: f64,
    /// 모집단 지수 r
    #[arg(short = 'r', long, default_value_t = 2.0)]
    popindex: f64,
    /// 천정 보정 계수
    #[arg(short = 'g', long, default_value_t = 1.5)]
    gamma: f64,
    /// Y축 상한 (생략 시 자동)
    #[arg(short = 'y', long)]
    ymax: Option<f64>,
    /// 관측소 필터 (쉼표 구분)
    #[arg(short = 's', long, default_value = "")]
    stations: String,
    /// 출력 모드 (graph/full)
    #[arg(short = 'o', long, default_value = "full")]
    output: String,
    /// URL만 출력하고 요청은 보내지 않는다
    #[arg(long)]
    url_only: bool,
    /// 언어 (auto/ko/en)
    #[arg(short = 'L', long)]
    lang: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 단발 질의 또는 CLI 메뉴를 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang_code = i18n::resolve_language(
        cli.lang.as_deref().unwrap_or("auto"),
        Some(cfg.language.as_str()),
    );
    let tr = i18n::Translator::new_with_pack(&lang_code, cfg.language_pack_dir.as_deref());

    match (&cli.shower, &cli.begin, &cli.end) {
        (Some(shower), Some(begin), Some(end)) => run_once(&cli, &cfg, shower, begin, end),
        _ => {
            app::run(&mut cfg, &tr)?;
            Ok(())
        }
    }
}

/// 단발 질의: URL을 출력하고, --url-only가 아니면 프래그먼트를 받아 그대로 쓴다.
fn run_once(
    cli: &Cli,
    cfg: &config::Config,
    shower: &str,
    begin: &str,
    end: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let begin = astro::parse_timestamp(begin)
        .ok_or_else(|| format!("타임스탬프를 해석할 수 없습니다: {begin}"))?;
    let end = astro::parse_timestamp(end)
        .ok_or_else(|| format!("타임스탬프를 해석할 수 없습니다: {end}"))?;
    let output = OutputMode::parse(&cli.output)
        .ok_or_else(|| format!("출력 모드는 graph 또는 full이어야 합니다: {}", cli.output))?;

    let query = FluxQuery {
        shower: shower.to_uppercase(),
        begin,
        end,
        min_eca: cli.min_eca,
        min_meteors: cli.min_meteors,
        min_interval: format_number(cli.min_interval),
        max_interval: format_number(cli.max_interval),
        pop_index: cli.popindex,
        gamma: cli.gamma,
        stations: cli.stations.clone(),
        output,
        ymax: cli.ymax,
    };
    let url = query.to_url(&cfg.endpoint)?;
    eprintln!("URL: {url}");
    if !cli.url_only {
        let body = fetch::fetch_fragment(url.as_str())?;
        println!("{body}");
    }
    Ok(())
}

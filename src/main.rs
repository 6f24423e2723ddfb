use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use pyeong_calculator::{
    app::{self, AppError},
    calculator::{AreaResult, Panel},
    config, conversion,
    format::format_number,
    i18n::{self, keys, Translator},
    logging, settings,
    tabs::TabId,
    ui_cli,
};
use tracing::info;

/// 평수계산기 커맨드라인
#[derive(Debug, Parser)]
#[command(name = "pyeong_calculator_cli", version, about)]
struct Cli {
    /// 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto", global = true)]
    lang: String,
    /// config.toml 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 디버그 로그 출력
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// 단위 변환 (m2, ha, ac, py)
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 4)]
        decimals: usize,
    },
    /// 넓이 × 높이(m) 면적을 m²와 평으로 계산
    Area { width: f64, height: f64 },
    /// 국민평형 아파트 참고표
    Table,
    /// 저장된 사용자 설정 조회/변경
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// 키패드 대화형 모드 (기본)
    Interactive,
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        default_panel: Option<Panel>,
        #[arg(long)]
        initial_tab: Option<TabId>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청된 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let lang = i18n::resolve_language(&cli.lang, None);
    if let Err(err) = try_run(cli) {
        let tr = Translator::new(&lang);
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = match &cli.config {
        Some(path) => config::load_or_default_at(path)?,
        None => config::load_or_default()?,
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let store = Arc::new(cfg.settings_store());
    info!(lang = tr.language_code(), "cli started");

    match cli.command.unwrap_or(CliCommand::Interactive) {
        CliCommand::Convert {
            value,
            from,
            to,
            decimals,
        } => {
            let result = conversion::convert(value, &from, &to)?;
            let unit = conversion::parse_area_unit(&to)?;
            println!("{} {}", format_number(result, decimals), unit.symbol());
        }
        CliCommand::Area { width, height } => {
            println!("{}", AreaResult::from_dimensions(width, height).render(&tr));
        }
        CliCommand::Table => print!("{}", ui_cli::render_table(&tr)),
        CliCommand::Settings { action } => {
            let mut current = settings::load(store.as_ref());
            if let SettingsAction::Set {
                default_panel,
                initial_tab,
            } = action
            {
                if let Some(panel) = default_panel {
                    current.default_panel = panel;
                }
                if let Some(tab) = initial_tab {
                    current.initial_tab = tab;
                }
                settings::save(store.as_ref(), &current);
                println!("{}", tr.t(keys::CLI_SETTINGS_SAVED));
            }
            println!("{}", ui_cli::render_settings(&current, &tr));
        }
        CliCommand::Interactive => app::run(&tr, store)?,
    }
    Ok(())
}

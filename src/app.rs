use std::sync::Arc;
use tracing::info;

use crate::calculator::{Calculator, Feedback};
use crate::conversion;
use crate::i18n::{keys, Translator};
use crate::settings::{self, Settings, SettingsStore};
use crate::ui_cli::{self, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 파일 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] conversion::ConversionError),
}

/// 대화형 세션에서 명령 하나를 처리한 뒤의 흐름.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(Vec<String>),
    Quit,
}

/// 대화형 CLI 세션. 계산기 상태와 사용자 설정을 함께 소유한다.
pub struct Session {
    calc: Calculator,
    settings: Settings,
    store: Arc<dyn SettingsStore>,
}

impl Session {
    /// 저장소에서 설정을 읽어 세션을 시작한다.
    pub fn open(store: Arc<dyn SettingsStore>) -> Self {
        let settings = settings::load(store.as_ref());
        Self {
            calc: Calculator::new(&settings),
            settings,
            store,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 명령 하나를 적용한다.
    pub fn apply(&mut self, cmd: Command, tr: &Translator) -> Flow {
        let mut messages = Vec::new();
        match cmd {
            Command::Event(event) => {
                if self.calc.handle(event) == Feedback::Cleared {
                    messages.push(format!("✓ {}", tr.t(keys::CLEAR)));
                }
            }
            Command::ShowSettings => messages.push(ui_cli::render_settings(&self.settings, tr)),
            Command::SetDefaultPanel(panel) => {
                self.settings.default_panel = panel;
                self.calc.set_default_panel(panel);
                self.persist(tr, &mut messages);
            }
            Command::SetInitialTab(tab) => {
                self.settings.initial_tab = tab;
                self.persist(tr, &mut messages);
            }
            Command::Help => {
                messages.push(tr.t(keys::CLI_HELP).to_string());
                messages.push(ui_cli::tab_list(tr));
            }
            Command::Quit => return Flow::Quit,
            Command::Unknown(tok) => {
                messages.push(format!("{} {tok}", tr.t(keys::CLI_UNKNOWN_TOKEN)));
            }
        }
        Flow::Continue(messages)
    }

    fn persist(&self, tr: &Translator, messages: &mut Vec<String>) {
        settings::save(self.store.as_ref(), &self.settings);
        messages.push(tr.t(keys::CLI_SETTINGS_SAVED).to_string());
    }
}

/// CLI 대화형 루프를 실행한다.
pub fn run(tr: &Translator, store: Arc<dyn SettingsStore>) -> Result<(), AppError> {
    let mut session = Session::open(store);
    info!(tab = %session.calculator().tab(), "interactive session started");
    println!("{}", tr.t(keys::CLI_HEADING));
    println!("{}", tr.t(keys::CLI_HELP));
    'outer: loop {
        print!("{}", ui_cli::render_state(session.calculator(), tr));
        let Some(line) = ui_cli::read_line(tr.t(keys::CLI_PROMPT))? else {
            break;
        };
        for cmd in ui_cli::parse_line(&line) {
            match session.apply(cmd, tr) {
                Flow::Continue(messages) => {
                    for msg in messages {
                        println!("{msg}");
                    }
                }
                Flow::Quit => break 'outer,
            }
        }
    }
    println!("{}", tr.t(keys::APP_EXIT));
    Ok(())
}

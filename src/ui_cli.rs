use std::io::{self, Write};

use crate::apartment::apartment_rows;
use crate::app::AppError;
use crate::calculator::{Calculator, Event, Key, Panel};
use crate::i18n::{keys, Translator};
use crate::settings::Settings;
use crate::tabs::{TabId, TAB_CONFIGS};

/// 대화형 모드에서 한 줄을 해석한 명령.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    ShowSettings,
    SetDefaultPanel(Panel),
    SetInitialTab(TabId),
    Help,
    Quit,
    Unknown(String),
}

/// 입력 한 줄을 명령 목록으로 바꾼다.
///
/// `12.5`처럼 붙여 쓴 숫자는 글자마다 키 하나로, `00`은 단독 토큰일 때만 `00` 키로 본다.
pub fn parse_line(line: &str) -> Vec<Command> {
    let mut out = Vec::new();
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        match tok {
            "q" | "quit" | "exit" => out.push(Command::Quit),
            "h" | "?" | "help" => out.push(Command::Help),
            "c" | "clear" => out.push(Command::Event(Event::Clear)),
            "l" => out.push(Command::Event(Event::SelectPanel(Panel::Left))),
            "r" => out.push(Command::Event(Event::SelectPanel(Panel::Right))),
            "t" | "tab" => match tokens.next().map(str::parse::<TabId>) {
                Some(Ok(tab)) => out.push(Command::Event(Event::SelectTab(tab))),
                Some(Err(e)) => out.push(Command::Unknown(e)),
                None => out.push(Command::Unknown(tok.to_string())),
            },
            "s" | "settings" => out.push(parse_settings(&mut tokens)),
            "00" => out.push(Command::Event(Event::Key(Key::DoubleZero))),
            other => out.extend(parse_keys(other)),
        }
    }
    out
}

fn parse_settings<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Command {
    match tokens.next() {
        None => Command::ShowSettings,
        Some("panel") => match tokens.next().map(str::parse::<Panel>) {
            Some(Ok(panel)) => Command::SetDefaultPanel(panel),
            Some(Err(e)) => Command::Unknown(e),
            None => Command::Unknown("panel".into()),
        },
        Some("tab") => match tokens.next().map(str::parse::<TabId>) {
            Some(Ok(tab)) => Command::SetInitialTab(tab),
            Some(Err(e)) => Command::Unknown(e),
            None => Command::Unknown("tab".into()),
        },
        Some(other) => Command::Unknown(other.to_string()),
    }
}

fn parse_keys(token: &str) -> Vec<Command> {
    let mut keys = Vec::new();
    for ch in token.chars() {
        match Key::from_token(ch.encode_utf8(&mut [0; 4])) {
            Some(key) => keys.push(Command::Event(Event::Key(key))),
            None => return vec![Command::Unknown(token.to_string())],
        }
    }
    keys
}

/// 현재 상태를 여러 줄 문자열로 그린다.
pub fn render_state(calc: &Calculator, tr: &Translator) -> String {
    let cfg = calc.tab_config();
    let mut out = format!(
        "{} [{}] {}\n",
        tr.t(keys::CLI_TAB_LINE),
        calc.tab(),
        tr.t(cfg.label_key)
    );
    if calc.tab() == TabId::Kukpyeong {
        out.push_str(&render_table(tr));
        return out;
    }
    for panel in [Panel::Left, Panel::Right] {
        let unit_key = match panel {
            Panel::Left => cfg.left_unit_key,
            Panel::Right => cfg.right_unit_key,
        };
        let display = calc.panel_display(panel);
        let marker = if calc.active_panel() == panel { '*' } else { ' ' };
        let hint = if display.is_input {
            tr.t(keys::HINT_INPUT)
        } else {
            tr.t(keys::HINT_RESULT)
        };
        out.push_str(&format!("{marker} {:<10} {:>20}  ({hint})\n", tr.t(unit_key), display.value));
    }
    if let Some(bar) = calc.result_bar() {
        out.push_str(&format!(
            "  {} {} = {} {}\n",
            bar.left,
            tr.t(cfg.left_unit_key),
            bar.right,
            tr.t(cfg.right_unit_key)
        ));
    }
    if let Some(area) = calc.area_result() {
        out.push_str(&format!("  {}\n", area.render(tr)));
    }
    out.push_str(&format!("  » {}\n", calc.summary_label(tr)));
    out
}

/// 국민평형 표를 그린다.
pub fn render_table(tr: &Translator) -> String {
    let mut out = String::new();
    for row in apartment_rows() {
        let [label, exclusive, exact, approx, supply] = row.cells(tr);
        out.push_str(&format!("{label:<8} {exclusive}  {exact}  ({approx})  {supply}\n"));
    }
    out
}

pub fn render_settings(settings: &Settings, tr: &Translator) -> String {
    let panel = match settings.default_panel {
        Panel::Left => tr.t(keys::SETTINGS_PANEL_LEFT),
        Panel::Right => tr.t(keys::SETTINGS_PANEL_RIGHT),
    };
    format!(
        "{}\n  {}: {}\n  {}: {}",
        tr.t(keys::CLI_SETTINGS_CURRENT),
        tr.t(keys::SETTINGS_DEFAULT_PANEL),
        panel,
        tr.t(keys::SETTINGS_INITIAL_TAB),
        tr.t(settings.initial_tab.config().label_key)
    )
}

/// 사용 가능한 탭 식별자 목록 (도움말용).
pub fn tab_list(tr: &Translator) -> String {
    TAB_CONFIGS
        .iter()
        .map(|c| format!("{}={}", c.id, tr.t(c.label_key)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력 끝(EOF)이면 `None`.
pub fn read_line(prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

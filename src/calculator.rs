//! 입력 상태 머신. 키패드/패널/탭 이벤트를 받아 좌우 입력 문자열을 갱신하고,
//! 반대편 결과값과 요약 문구는 매번 상태로부터 다시 계산한다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::{format_number, parse_float, trim_decimal};
use crate::i18n::{keys, Translator};
use crate::settings::Settings;
use crate::tabs::{TabConfig, TabId};
use crate::units::area_to_pyeong;

/// 일반 키 입력 시 허용하는 최대 길이.
pub const MAX_INPUT_LEN: usize = 12;
/// 이 길이 이상이면 `00` 키를 무시한다.
pub const DOUBLE_ZERO_LIMIT: usize = 11;
/// 패널 전환 시 넘겨주는 값과 결과 표시의 소수 자릿수.
pub const RESULT_DECIMALS: usize = 4;

/// 좌/우 입력 패널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Left,
    Right,
}

impl Panel {
    pub fn other(&self) -> Panel {
        match self {
            Panel::Left => Panel::Right,
            Panel::Right => Panel::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::Left => "left",
            Panel::Right => "right",
        }
    }
}

impl std::str::FromStr for Panel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Panel::Left),
            "right" | "r" => Ok(Panel::Right),
            _ => Err(format!("unknown panel: {s}")),
        }
    }
}

/// 숫자 키패드의 키.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    DoubleZero,
    Backspace,
}

impl Key {
    /// `"7"`, `"."`, `"00"`, `"<"` 같은 토큰을 키로 바꾼다.
    pub fn from_token(token: &str) -> Option<Key> {
        match token {
            "." => Some(Key::Decimal),
            "00" => Some(Key::DoubleZero),
            "<" | "←" | "backspace" => Some(Key::Backspace),
            t if t.len() == 1 => {
                let b = t.as_bytes()[0];
                b.is_ascii_digit().then(|| Key::Digit(b - b'0'))
            }
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::Decimal => ".".into(),
            Key::DoubleZero => "00".into(),
            Key::Backspace => "←".into(),
        }
    }
}

/// 계산기에 전달되는 사용자 이벤트.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Clear,
    SelectPanel(Panel),
    SelectTab(TabId),
}

/// 이벤트 처리 후 UI가 보여줄 일시적 반응.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Silent,
    /// 초기화 버튼 깜빡임/진동
    Cleared,
}

/// 한 키 입력을 이전 문자열에 적용한 결과. 상태 없는 순수 함수이다.
pub fn apply_key(prev: &str, key: Key) -> String {
    match key {
        Key::Backspace => {
            let mut s = prev.to_string();
            s.pop();
            s
        }
        Key::Decimal => {
            if prev.contains('.') {
                prev.to_string()
            } else if prev.is_empty() {
                "0.".to_string()
            } else {
                format!("{prev}.")
            }
        }
        Key::DoubleZero => {
            if prev.is_empty() || prev == "0" {
                "0".to_string()
            } else if prev.len() >= DOUBLE_ZERO_LIMIT {
                prev.to_string()
            } else {
                format!("{prev}00")
            }
        }
        Key::Digit(d) => {
            let ch = char::from(b'0' + d.min(9));
            if prev == "0" {
                ch.to_string()
            } else if prev.len() >= MAX_INPUT_LEN {
                prev.to_string()
            } else {
                format!("{prev}{ch}")
            }
        }
    }
}

/// 패널 하나의 표시 내용.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDisplay {
    pub value: String,
    /// 입력 중인 쪽이면 true, 결과를 보여주는 쪽이면 false
    pub is_input: bool,
}

/// 변환 탭 하단 결과바. 항상 왼쪽 단위 = 오른쪽 단위 순서이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBar {
    pub left: String,
    pub right: String,
}

/// 면적계산 탭의 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaResult {
    pub sqm: f64,
    pub pyeong: f64,
}

impl AreaResult {
    /// 넓이 × 높이(m)로 계산한다. 면적이 0 이하이면 평수도 0이다.
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        let sqm = width * height;
        let pyeong = if sqm > 0.0 { area_to_pyeong(width, height) } else { 0.0 };
        Self { sqm, pyeong }
    }

    pub fn sqm_text(&self) -> String {
        format_number(self.sqm, 2)
    }

    pub fn pyeong_text(&self) -> String {
        format_number(self.pyeong, 2)
    }

    /// `"100 m² = 30.25 평"` 형식의 한 줄.
    pub fn render(&self, tr: &Translator) -> String {
        format!(
            "{} m² = {} {}",
            self.sqm_text(),
            self.pyeong_text(),
            tr.t(keys::UNIT_PYEONG)
        )
    }
}

/// 하단 요약 문구의 종류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Summary {
    /// 넓이와 높이가 모두 양수일 때의 계산 결과
    Area(AreaResult),
    /// 면적계산 탭에서 아직 입력이 부족할 때
    AreaPrompt,
    /// 변환 방향 (i18n 단위 키)
    Direction {
        from_key: &'static str,
        to_key: &'static str,
    },
    Reference,
}

impl Summary {
    pub fn render(&self, tr: &Translator) -> String {
        match self {
            Summary::Area(area) => area.render(tr),
            Summary::AreaPrompt => tr.t(keys::SUMMARY_AREA_PROMPT).to_string(),
            Summary::Direction { from_key, to_key } => tr
                .t(keys::SUMMARY_DIRECTION)
                .replace("{from}", tr.t(from_key))
                .replace("{to}", tr.t(to_key)),
            Summary::Reference => tr.t(keys::SUMMARY_REFERENCE).to_string(),
        }
    }
}

/// 평수 계산기의 전체 입력 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculator {
    tab: TabId,
    active: Panel,
    left_raw: String,
    right_raw: String,
    default_panel: Panel,
}

fn entry_panel(tab: TabId, default_panel: Panel) -> Panel {
    if tab == TabId::Area {
        Panel::Left
    } else {
        default_panel
    }
}

fn parse_or_zero(raw: &str) -> f64 {
    parse_float(raw).unwrap_or(0.0)
}

impl Calculator {
    /// 저장된 설정의 초기 탭과 기본 패널로 시작한다.
    pub fn new(settings: &Settings) -> Self {
        Self {
            tab: settings.initial_tab,
            active: entry_panel(settings.initial_tab, settings.default_panel),
            left_raw: String::new(),
            right_raw: String::new(),
            default_panel: settings.default_panel,
        }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn tab_config(&self) -> &'static TabConfig {
        self.tab.config()
    }

    pub fn active_panel(&self) -> Panel {
        self.active
    }

    pub fn raw(&self, panel: Panel) -> &str {
        match panel {
            Panel::Left => &self.left_raw,
            Panel::Right => &self.right_raw,
        }
    }

    fn raw_mut(&mut self, panel: Panel) -> &mut String {
        match panel {
            Panel::Left => &mut self.left_raw,
            Panel::Right => &mut self.right_raw,
        }
    }

    /// 이후 탭 전환에 쓰일 기본 패널을 바꾼다. 현재 상태는 건드리지 않는다.
    pub fn set_default_panel(&mut self, panel: Panel) {
        self.default_panel = panel;
    }

    /// 이벤트 하나를 처리한다.
    pub fn handle(&mut self, event: Event) -> Feedback {
        debug!(?event, tab = %self.tab, active = self.active.as_str(), "calculator event");
        match event {
            Event::Key(key) => self.press(key),
            Event::Clear => {
                self.left_raw.clear();
                self.right_raw.clear();
                return Feedback::Cleared;
            }
            Event::SelectPanel(panel) => self.select_panel(panel),
            Event::SelectTab(tab) => self.select_tab(tab),
        }
        Feedback::Silent
    }

    fn press(&mut self, key: Key) {
        if self.tab == TabId::Kukpyeong {
            return;
        }
        // 면적계산 외에는 항상 새 단일 입력으로 시작
        if self.tab != TabId::Area {
            self.raw_mut(self.active.other()).clear();
        }
        let active = self.active;
        let next = apply_key(self.raw(active), key);
        *self.raw_mut(active) = next;
    }

    fn select_panel(&mut self, panel: Panel) {
        if self.tab == TabId::Kukpyeong {
            return;
        }
        if panel == self.active || self.tab == TabId::Area {
            self.active = panel;
            return;
        }
        // 떠나는 쪽의 결과값을 콤마 없는 입력값으로 넘긴다
        let leaving = self.active;
        let convert = self.conversion_from(leaving);
        let handed = parse_float(self.raw(leaving))
            .filter(|v| *v != 0.0)
            .and_then(|v| trim_decimal(convert(v), RESULT_DECIMALS))
            .unwrap_or_default();
        *self.raw_mut(panel) = handed;
        self.raw_mut(leaving).clear();
        self.active = panel;
    }

    fn select_tab(&mut self, tab: TabId) {
        self.tab = tab;
        self.active = entry_panel(tab, self.default_panel);
        self.left_raw.clear();
        self.right_raw.clear();
    }

    /// `from` 쪽 값을 반대편 단위로 바꾸는 함수.
    fn conversion_from(&self, from: Panel) -> fn(f64) -> f64 {
        let cfg = self.tab_config();
        match from {
            Panel::Left => cfg.left_to_right,
            Panel::Right => cfg.right_to_left,
        }
    }

    /// 변환 탭에서 입력하지 않는 쪽에 표시할 값. 그 외 탭에서는 빈 문자열.
    pub fn derived_value(&self) -> String {
        if !self.tab.is_conversion() {
            return String::new();
        }
        match parse_float(self.raw(self.active)) {
            Some(v) if v != 0.0 => {
                format_number(self.conversion_from(self.active)(v), RESULT_DECIMALS)
            }
            _ => "0".to_string(),
        }
    }

    /// 패널에 표시할 값과 입력/결과 구분.
    pub fn panel_display(&self, panel: Panel) -> PanelDisplay {
        match self.tab {
            TabId::Kukpyeong => PanelDisplay {
                value: String::new(),
                is_input: false,
            },
            TabId::Area => PanelDisplay {
                value: non_empty_or_zero(self.raw(panel)),
                is_input: true,
            },
            _ if panel == self.active => PanelDisplay {
                value: non_empty_or_zero(self.raw(panel)),
                is_input: true,
            },
            _ => PanelDisplay {
                value: self.derived_value(),
                is_input: false,
            },
        }
    }

    /// 변환 탭의 결과바. 다른 탭에서는 `None`.
    pub fn result_bar(&self) -> Option<ResultBar> {
        if !self.tab.is_conversion() {
            return None;
        }
        let typed = format_number(parse_or_zero(self.raw(self.active)), 2);
        let derived = self.derived_value();
        Some(match self.active {
            Panel::Left => ResultBar {
                left: typed,
                right: derived,
            },
            Panel::Right => ResultBar {
                left: derived,
                right: typed,
            },
        })
    }

    /// 면적계산 탭의 결과. 곱이 0 이하이면 평은 0으로 둔다.
    pub fn area_result(&self) -> Option<AreaResult> {
        if self.tab != TabId::Area {
            return None;
        }
        Some(AreaResult::from_dimensions(
            parse_or_zero(&self.left_raw),
            parse_or_zero(&self.right_raw),
        ))
    }

    /// 하단 요약 문구.
    pub fn summary(&self) -> Summary {
        let cfg = self.tab_config();
        match self.tab {
            TabId::Kukpyeong => Summary::Reference,
            TabId::Area => {
                let w = parse_or_zero(&self.left_raw);
                let h = parse_or_zero(&self.right_raw);
                if w > 0.0 && h > 0.0 {
                    Summary::Area(AreaResult::from_dimensions(w, h))
                } else {
                    Summary::AreaPrompt
                }
            }
            _ => match self.active {
                Panel::Left => Summary::Direction {
                    from_key: cfg.left_unit_key,
                    to_key: cfg.right_unit_key,
                },
                Panel::Right => Summary::Direction {
                    from_key: cfg.right_unit_key,
                    to_key: cfg.left_unit_key,
                },
            },
        }
    }

    pub fn summary_label(&self, tr: &Translator) -> String {
        self.summary().render(tr)
    }
}

fn non_empty_or_zero(raw: &str) -> String {
    if raw.is_empty() {
        "0".to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(start: &str, keys: &[Key]) -> String {
        keys.iter().fold(start.to_string(), |acc, k| apply_key(&acc, *k))
    }

    #[test]
    fn digits_and_single_decimal_point() {
        let s = type_keys("", &[Key::Digit(5), Key::Decimal, Key::Digit(5)]);
        assert_eq!(s, "5.5");
        assert_eq!(apply_key(&s, Key::Decimal), "5.5");
    }

    #[test]
    fn decimal_on_empty_starts_with_zero() {
        assert_eq!(apply_key("", Key::Decimal), "0.");
    }

    #[test]
    fn leading_zero_is_replaced() {
        assert_eq!(apply_key("0", Key::Digit(7)), "7");
        assert_eq!(apply_key("0.", Key::Digit(7)), "0.7");
    }

    #[test]
    fn length_cap_makes_digit_a_no_op() {
        let full = "123456789012";
        assert_eq!(apply_key(full, Key::Digit(3)), full);
        assert_eq!(apply_key("12345678901", Key::Digit(3)), "123456789013");
    }

    #[test]
    fn double_zero_rules() {
        assert_eq!(apply_key("", Key::DoubleZero), "0");
        assert_eq!(apply_key("0", Key::DoubleZero), "0");
        assert_eq!(apply_key("12", Key::DoubleZero), "1200");
        assert_eq!(apply_key("1234567890", Key::DoubleZero), "123456789000");
        assert_eq!(apply_key("12345678901", Key::DoubleZero), "12345678901");
    }

    #[test]
    fn backspace_on_empty_stays_empty() {
        assert_eq!(apply_key("", Key::Backspace), "");
        assert_eq!(apply_key("12.", Key::Backspace), "12");
    }

    #[test]
    fn key_tokens() {
        assert_eq!(Key::from_token("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_token("00"), Some(Key::DoubleZero));
        assert_eq!(Key::from_token("<"), Some(Key::Backspace));
        assert_eq!(Key::from_token("x"), None);
    }

    #[test]
    fn key_labels_parse_back_to_the_same_key() {
        let all = [
            Key::Digit(0),
            Key::Digit(9),
            Key::Decimal,
            Key::DoubleZero,
            Key::Backspace,
        ];
        for key in all {
            assert_eq!(Key::from_token(&key.label()), Some(key));
        }
    }
}

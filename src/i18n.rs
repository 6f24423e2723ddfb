use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const TAB_SQM: &str = "tab.sqm";
    pub const TAB_HA: &str = "tab.ha";
    pub const TAB_AC: &str = "tab.ac";
    pub const TAB_AREA: &str = "tab.area";
    pub const TAB_KUKPYEONG: &str = "tab.kukpyeong";

    pub const UNIT_SQM: &str = "unit.sqm";
    pub const UNIT_HA: &str = "unit.ha";
    pub const UNIT_AC: &str = "unit.ac";
    pub const UNIT_PYEONG: &str = "unit.pyeong";
    pub const UNIT_WIDTH: &str = "unit.width";
    pub const UNIT_HEIGHT: &str = "unit.height";
    pub const UNIT_NONE: &str = "unit.none";

    pub const HINT_INPUT: &str = "panel.hint_input";
    pub const HINT_RESULT: &str = "panel.hint_result";

    pub const SUMMARY_AREA_PROMPT: &str = "summary.area_prompt";
    pub const SUMMARY_DIRECTION: &str = "summary.direction";
    pub const SUMMARY_REFERENCE: &str = "summary.reference";

    pub const CLEAR: &str = "action.clear";

    pub const KUK_EXCLUSIVE: &str = "kukpyeong.exclusive";
    pub const KUK_SUPPLY: &str = "kukpyeong.supply";
    pub const KUK_APPROX: &str = "kukpyeong.approx";

    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_DEFAULT_PANEL: &str = "settings.default_panel";
    pub const SETTINGS_DEFAULT_PANEL_DESC: &str = "settings.default_panel_desc";
    pub const SETTINGS_PANEL_RIGHT: &str = "settings.panel_right";
    pub const SETTINGS_PANEL_LEFT: &str = "settings.panel_left";
    pub const SETTINGS_INITIAL_TAB: &str = "settings.initial_tab";
    pub const SETTINGS_INITIAL_TAB_DESC: &str = "settings.initial_tab_desc";
    pub const SETTINGS_FONT: &str = "settings.font";
    pub const SETTINGS_FONT_PICK: &str = "settings.font_pick";
    pub const SETTINGS_FONT_ERROR: &str = "settings.font_error";

    pub const CLI_HEADING: &str = "cli.heading";
    pub const CLI_HELP: &str = "cli.help";
    pub const CLI_PROMPT: &str = "cli.prompt";
    pub const CLI_UNKNOWN_TOKEN: &str = "cli.unknown_token";
    pub const CLI_TAB_LINE: &str = "cli.tab_line";
    pub const CLI_SETTINGS_CURRENT: &str = "cli.settings_current";
    pub const CLI_SETTINGS_SAVED: &str = "cli.settings_saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩이 우선이고, 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "평수계산기",
        TAB_SQM => "제곱미터 m²↔평",
        TAB_HA => "헥타르 ha↔평",
        TAB_AC => "에이커 ac↔평",
        TAB_AREA => "면적계산 넓이×높이",
        TAB_KUKPYEONG => "국민평형 아파트",
        UNIT_SQM => "m²",
        UNIT_HA => "ha",
        UNIT_AC => "ac",
        UNIT_PYEONG => "평",
        UNIT_WIDTH => "넓이 (m)",
        UNIT_HEIGHT => "높이 (m)",
        UNIT_NONE => "",
        HINT_INPUT => "입력",
        HINT_RESULT => "결과",
        SUMMARY_AREA_PROMPT => "넓이 × 높이 → 평수 변환",
        SUMMARY_DIRECTION => "{from} → {to} 변환",
        SUMMARY_REFERENCE => "국민평형 아파트 참고표",
        CLEAR => "초기화",
        KUK_EXCLUSIVE => "전용",
        KUK_SUPPLY => "공급면적",
        KUK_APPROX => "약",
        SETTINGS_TITLE => "설정",
        SETTINGS_DEFAULT_PANEL => "기본 입력 단위",
        SETTINGS_DEFAULT_PANEL_DESC => "탭 전환 시 선택되는 기본 입력",
        SETTINGS_PANEL_RIGHT => "평 (기본)",
        SETTINGS_PANEL_LEFT => "m² / ha / ac",
        SETTINGS_INITIAL_TAB => "시작 탭",
        SETTINGS_INITIAL_TAB_DESC => "앱 실행 시 처음 표시되는 탭",
        SETTINGS_FONT => "폰트",
        SETTINGS_FONT_PICK => "폰트 파일 선택...",
        SETTINGS_FONT_ERROR => "폰트를 불러오지 못했습니다:",
        CLI_HEADING => "\n=== 평수계산기 ===",
        CLI_HELP => "키: 0-9 . 00 <(지우기) | 명령: c=초기화 l/r=패널 t <탭>=탭 전환 s=설정 q=종료",
        CLI_PROMPT => "> ",
        CLI_UNKNOWN_TOKEN => "알 수 없는 입력:",
        CLI_TAB_LINE => "탭:",
        CLI_SETTINGS_CURRENT => "현재 설정:",
        CLI_SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Pyeong Calculator",
        TAB_SQM => "Square meter m²↔pyeong",
        TAB_HA => "Hectare ha↔pyeong",
        TAB_AC => "Acre ac↔pyeong",
        TAB_AREA => "Area width×height",
        TAB_KUKPYEONG => "Apartment types",
        UNIT_PYEONG => "pyeong",
        UNIT_WIDTH => "Width (m)",
        UNIT_HEIGHT => "Height (m)",
        HINT_INPUT => "input",
        HINT_RESULT => "result",
        SUMMARY_AREA_PROMPT => "Width × height → pyeong",
        SUMMARY_DIRECTION => "{from} → {to}",
        SUMMARY_REFERENCE => "Standard apartment sizes",
        CLEAR => "Clear",
        KUK_EXCLUSIVE => "Exclusive",
        KUK_SUPPLY => "Supply area",
        KUK_APPROX => "approx.",
        SETTINGS_TITLE => "Settings",
        SETTINGS_DEFAULT_PANEL => "Default input unit",
        SETTINGS_DEFAULT_PANEL_DESC => "Input selected when switching tabs",
        SETTINGS_PANEL_RIGHT => "pyeong (default)",
        SETTINGS_INITIAL_TAB => "Start tab",
        SETTINGS_INITIAL_TAB_DESC => "Tab shown when the app starts",
        SETTINGS_FONT => "Font",
        SETTINGS_FONT_PICK => "Choose font file...",
        SETTINGS_FONT_ERROR => "Failed to load font:",
        CLI_HEADING => "\n=== Pyeong Calculator ===",
        CLI_HELP => "Keys: 0-9 . 00 <(backspace) | Commands: c=clear l/r=panel t <tab>=switch tab s=settings q=quit",
        CLI_UNKNOWN_TOKEN => "Unknown input:",
        CLI_TAB_LINE => "Tab:",
        CLI_SETTINGS_CURRENT => "Current settings:",
        CLI_SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

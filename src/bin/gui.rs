#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path, sync::Arc};
use tracing::{info, warn};

use pyeong_calculator::{
    apartment::apartment_rows,
    calculator::{Calculator, Event, Feedback, Key, Panel},
    config,
    i18n::{self, keys, Translator},
    logging,
    settings::{self, BackgroundSaver, Settings, SettingsStore},
    tabs::{TabId, TAB_CONFIGS},
};

/// 초기화 버튼 깜빡임 시간(초)
const CLEAR_FLASH_SECS: f64 = 0.4;

const NUMPAD: [&[Key]; 4] = [
    &[Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Backspace],
    &[Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Decimal],
    &[Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::DoubleZero],
    &[Key::Digit(0)],
];

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x3B, 0x82, 0xF6);

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx 또는 --lang=xx, --verbose
    let mut cli_lang: Option<String> = None;
    let mut verbose = false;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        } else if a == "--verbose" || a == "-v" {
            verbose = true;
        }
        i += 1;
    }
    logging::init(verbose);

    let app_cfg = config::load_or_default().unwrap_or_else(|err| {
        warn!(%err, "config.toml unavailable, using defaults");
        config::Config::default()
    });
    let lang = i18n::resolve_language(
        cli_lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([440.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "평수계산기",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx, app_cfg.font_path.as_deref()) {
                warn!("font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 적용한다.
/// 0) config.toml의 font_path
/// 1) assets/fonts/ 아래 번들 폰트
/// 2) OS별 시스템 한글 폰트
/// 모두 실패하면 Err를 반환해 사용자 지정 폰트 선택을 유도한다.
fn setup_fonts(ctx: &egui::Context, custom: Option<&str>) -> Result<(), String> {
    if let Some(path) = custom {
        if load_custom_font(ctx, path).is_ok() {
            return Ok(());
        }
    }

    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/NanumGothic.ttf".into(),
        "assets/fonts/malgun.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    candidates.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        ]
        .map(std::path::PathBuf::from),
    );

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Korean font not found. Please choose a font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    saver: BackgroundSaver,
    settings: Settings,
    calc: Calculator,
    show_settings_modal: bool,
    clear_flash_started: Option<f64>,
    font_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.language_pack_dir.as_deref());
        let store: Arc<dyn SettingsStore> = Arc::new(config.settings_store());
        let settings = settings::load(store.as_ref());
        info!(lang = tr.language_code(), tab = %settings.initial_tab, "gui started");
        Self {
            calc: Calculator::new(&settings),
            config,
            tr,
            saver: BackgroundSaver::spawn(store),
            settings,
            show_settings_modal: false,
            clear_flash_started: None,
            font_status: None,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        if self.calc.handle(event) == Feedback::Cleared {
            self.clear_flash_started = Some(ctx.input(|i| i.time));
        }
    }

    /// 설정을 메모리에 먼저 반영하고 저장은 백그라운드로 보낸다.
    fn update_settings(&mut self, next: Settings) {
        if next == self.settings {
            return;
        }
        self.settings = next;
        self.calc.set_default_panel(next.default_panel);
        self.saver.submit(next);
    }

    /// 물리 키보드 입력을 키패드 이벤트로 바꾼다.
    fn keyboard_events(ctx: &egui::Context) -> Vec<Event> {
        ctx.input(|i| {
            let mut out = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(text) => {
                        for ch in text.chars() {
                            if let Some(key) = Key::from_token(ch.encode_utf8(&mut [0; 4])) {
                                out.push(Event::Key(key));
                            }
                        }
                    }
                    egui::Event::Key {
                        key: egui::Key::Backspace,
                        pressed: true,
                        ..
                    } => out.push(Event::Key(Key::Backspace)),
                    egui::Event::Key {
                        key: egui::Key::Delete | egui::Key::Escape,
                        pressed: true,
                        ..
                    } => out.push(Event::Clear),
                    _ => {}
                }
            }
            out
        })
    }

    fn clear_flash(&mut self, ctx: &egui::Context) -> f32 {
        let Some(start) = self.clear_flash_started else {
            return 0.0;
        };
        let elapsed = ctx.input(|i| i.time) - start;
        if elapsed >= CLEAR_FLASH_SECS {
            self.clear_flash_started = None;
            return 0.0;
        }
        ctx.request_repaint();
        (1.0 - elapsed / CLEAR_FLASH_SECS) as f32
    }

    fn ui_header(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let flash = self.clear_flash(ctx);
        ui.horizontal(|ui| {
            ui.heading(self.tr.t(keys::APP_TITLE));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let fill = if flash > 0.0 {
                    ACCENT.gamma_multiply(flash)
                } else {
                    ui.visuals().widgets.inactive.weak_bg_fill
                };
                let clear = egui::Button::new(self.tr.t(keys::CLEAR)).fill(fill);
                if ui.add(clear).clicked() {
                    self.dispatch(ctx, Event::Clear);
                }
                if ui.button("⚙").clicked() {
                    self.show_settings_modal = true;
                }
            });
        });
    }

    fn ui_tabs(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for cfg in &TAB_CONFIGS {
                let selected = self.calc.tab() == cfg.id;
                if ui.selectable_label(selected, self.tr.t(cfg.label_key)).clicked() && !selected {
                    self.dispatch(ctx, Event::SelectTab(cfg.id));
                }
            }
        });
    }

    fn ui_panels(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let cfg = self.calc.tab_config();
        let divider = if self.calc.tab() == TabId::Area { "×" } else { "⇄" };
        let mut clicked = None;
        ui.horizontal(|ui| {
            let width = (ui.available_width() - 40.0) / 2.0;
            let sides = [
                (Panel::Left, cfg.left_unit_key),
                (Panel::Right, cfg.right_unit_key),
            ];
            for (panel, unit_key) in sides {
                let display = self.calc.panel_display(panel);
                let hint = if display.is_input {
                    self.tr.t(keys::HINT_INPUT)
                } else {
                    self.tr.t(keys::HINT_RESULT)
                };
                let active = self.calc.active_panel() == panel;
                let text = egui::RichText::new(format!(
                    "{}\n{}\n{}",
                    self.tr.t(unit_key),
                    display.value,
                    hint
                ))
                .size(20.0);
                let button = egui::Button::new(text).selected(active);
                if ui.add_sized([width, 110.0], button).clicked() {
                    clicked = Some(panel);
                }
                if panel == Panel::Left {
                    ui.label(egui::RichText::new(divider).size(22.0));
                }
            }
        });
        if let Some(panel) = clicked {
            self.dispatch(ctx, Event::SelectPanel(panel));
        }

        ui.add_space(6.0);
        if let Some(bar) = self.calc.result_bar() {
            ui.horizontal(|ui| {
                ui.label(format!("{} {}", bar.left, self.tr.t(cfg.left_unit_key)));
                ui.label("=");
                ui.strong(format!("{} {}", bar.right, self.tr.t(cfg.right_unit_key)));
            });
        }
        if let Some(area) = self.calc.area_result() {
            ui.horizontal(|ui| {
                ui.label(format!("{} m²", area.sqm_text()));
                ui.label("=");
                ui.strong(format!("{} {}", area.pyeong_text(), self.tr.t(keys::UNIT_PYEONG)));
            });
        }
    }

    fn ui_numpad(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let mut pressed = None;
        egui::Grid::new("numpad")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for row in NUMPAD {
                    for key in row.iter().copied() {
                        let button = egui::Button::new(egui::RichText::new(key.label()).size(22.0));
                        if ui.add_sized([90.0, 52.0], button).clicked() {
                            pressed = Some(key);
                        }
                    }
                    ui.end_row();
                }
            });
        if let Some(key) = pressed {
            self.dispatch(ctx, Event::Key(key));
        }
    }

    fn ui_apartment_table(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("kukpyeong")
                .num_columns(5)
                .striped(true)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for row in apartment_rows() {
                        let [label, exclusive, exact, approx, supply] = row.cells(&self.tr);
                        ui.strong(label);
                        ui.label(exclusive);
                        ui.strong(exact);
                        ui.label(approx);
                        ui.label(supply);
                        ui.end_row();
                    }
                });
        });
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        let mut next = self.settings;
        let mut open = self.show_settings_modal;
        let mut pick_font = false;
        egui::Window::new(self.tr.t(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.strong(self.tr.t(keys::SETTINGS_DEFAULT_PANEL));
                ui.small(self.tr.t(keys::SETTINGS_DEFAULT_PANEL_DESC));
                ui.radio_value(
                    &mut next.default_panel,
                    Panel::Right,
                    self.tr.t(keys::SETTINGS_PANEL_RIGHT),
                );
                ui.radio_value(
                    &mut next.default_panel,
                    Panel::Left,
                    self.tr.t(keys::SETTINGS_PANEL_LEFT),
                );
                ui.separator();
                ui.strong(self.tr.t(keys::SETTINGS_INITIAL_TAB));
                ui.small(self.tr.t(keys::SETTINGS_INITIAL_TAB_DESC));
                for tab in TabId::ALL {
                    ui.radio_value(&mut next.initial_tab, tab, self.tr.t(tab.config().label_key));
                }
                ui.separator();
                ui.strong(self.tr.t(keys::SETTINGS_FONT));
                if ui.button(self.tr.t(keys::SETTINGS_FONT_PICK)).clicked() {
                    pick_font = true;
                }
                if let Some(msg) = &self.font_status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings_modal = open;
        self.update_settings(next);
        if pick_font {
            self.pick_font(ctx);
        }
    }

    fn pick_font(&mut self, ctx: &egui::Context) {
        let Some(path) = FileDialog::new()
            .add_filter("font", &["ttf", "ttc", "otf"])
            .pick_file()
        else {
            return;
        };
        let path = path.display().to_string();
        match load_custom_font(ctx, &path) {
            Ok(()) => {
                self.font_status = None;
                self.config.font_path = Some(path);
                if let Err(err) = self.config.save() {
                    warn!(%err, "failed to save config.toml");
                }
            }
            Err(e) => {
                self.font_status = Some(format!("{} {e}", self.tr.t(keys::SETTINGS_FONT_ERROR)));
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if !self.show_settings_modal {
            for event in Self::keyboard_events(ctx) {
                self.dispatch(ctx, event);
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_header(ctx, ui);
            ui.separator();
            self.ui_tabs(ctx, ui);
        });

        if self.show_settings_modal {
            self.ui_settings_modal(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.calc.tab() == TabId::Kukpyeong {
                self.ui_apartment_table(ui);
                return;
            }
            self.ui_panels(ctx, ui);
            ui.add_space(12.0);
            self.ui_numpad(ctx, ui);
            ui.add_space(12.0);
            let summary = self.calc.summary_label(&self.tr);
            ui.add_sized(
                [ui.available_width(), 44.0],
                egui::Button::new(egui::RichText::new(summary).size(16.0))
                    .fill(ACCENT.gamma_multiply(0.25)),
            );
        });
    }
}

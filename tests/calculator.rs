//! 입력 상태 머신 시나리오 테스트.
use pyeong_calculator::apartment::{apartment_rows, APARTMENT_TYPES};
use pyeong_calculator::calculator::{AreaResult, Calculator, Event, Feedback, Key, Panel, Summary};
use pyeong_calculator::i18n::Translator;
use pyeong_calculator::settings::Settings;
use pyeong_calculator::tabs::TabId;

fn calc(tab: TabId, default_panel: Panel) -> Calculator {
    Calculator::new(&Settings {
        default_panel,
        initial_tab: tab,
    })
}

fn press(c: &mut Calculator, keys: &str) {
    for ch in keys.chars() {
        let key = Key::from_token(ch.encode_utf8(&mut [0; 4])).expect("key");
        c.handle(Event::Key(key));
    }
}

#[test]
fn digit_entry_with_single_decimal_point() {
    let mut c = calc(TabId::Sqm, Panel::Right);
    press(&mut c, "5.5");
    assert_eq!(c.raw(Panel::Right), "5.5");
    press(&mut c, ".");
    assert_eq!(c.raw(Panel::Right), "5.5");
}

#[test]
fn panel_switch_hands_off_rounded_result() {
    let mut c = calc(TabId::Sqm, Panel::Right);
    press(&mut c, "10");
    assert_eq!(c.derived_value(), "33.0579");

    c.handle(Event::SelectPanel(Panel::Left));
    assert_eq!(c.active_panel(), Panel::Left);
    assert_eq!(c.raw(Panel::Left), "33.0579");
    assert_eq!(c.raw(Panel::Right), "");
}

#[test]
fn panel_switch_back_converts_again() {
    let mut c = calc(TabId::Sqm, Panel::Left);
    press(&mut c, "100");
    assert_eq!(c.derived_value(), "30.25");
    c.handle(Event::SelectPanel(Panel::Right));
    assert_eq!(c.raw(Panel::Right), "30.25");
    assert_eq!(c.raw(Panel::Left), "");
}

#[test]
fn hectare_hand_off_keeps_four_decimals() {
    let mut c = calc(TabId::Ha, Panel::Right);
    press(&mut c, "1000");
    c.handle(Event::SelectPanel(Panel::Left));
    assert_eq!(c.raw(Panel::Left), "0.3306");
}

#[test]
fn zero_or_empty_hand_off_yields_empty() {
    let mut c = calc(TabId::Sqm, Panel::Right);
    press(&mut c, "0.");
    assert_eq!(c.derived_value(), "0");
    c.handle(Event::SelectPanel(Panel::Left));
    assert_eq!(c.raw(Panel::Left), "");

    c.handle(Event::SelectPanel(Panel::Right));
    assert_eq!(c.raw(Panel::Right), "");
}

#[test]
fn selecting_active_panel_keeps_input() {
    let mut c = calc(TabId::Ac, Panel::Right);
    press(&mut c, "42");
    c.handle(Event::SelectPanel(Panel::Right));
    assert_eq!(c.raw(Panel::Right), "42");
}

#[test]
fn tab_change_resets_and_picks_panel() {
    let mut c = calc(TabId::Sqm, Panel::Right);
    press(&mut c, "10");
    c.handle(Event::SelectTab(TabId::Area));
    assert_eq!(c.tab(), TabId::Area);
    assert_eq!(c.active_panel(), Panel::Left);
    assert_eq!(c.raw(Panel::Left), "");
    assert_eq!(c.raw(Panel::Right), "");

    c.handle(Event::SelectTab(TabId::Ha));
    assert_eq!(c.active_panel(), Panel::Right);

    c.set_default_panel(Panel::Left);
    c.handle(Event::SelectTab(TabId::Sqm));
    assert_eq!(c.active_panel(), Panel::Left);
}

#[test]
fn starting_in_area_tab_focuses_width() {
    let c = calc(TabId::Area, Panel::Right);
    assert_eq!(c.active_panel(), Panel::Left);
}

#[test]
fn area_mode_keeps_both_operands() {
    let mut c = calc(TabId::Area, Panel::Right);
    assert_eq!(c.summary(), Summary::AreaPrompt);
    press(&mut c, "10");
    c.handle(Event::SelectPanel(Panel::Right));
    assert_eq!(c.raw(Panel::Left), "10");
    assert_eq!(c.raw(Panel::Right), "");
    press(&mut c, "10");
    assert_eq!(c.raw(Panel::Left), "10");
    assert_eq!(c.raw(Panel::Right), "10");

    let area = c.area_result().expect("area tab");
    assert_eq!(area.sqm_text(), "100");
    assert_eq!(area.pyeong_text(), "30.25");

    let tr = Translator::new("ko");
    assert_eq!(c.summary_label(&tr), "100 m² = 30.25 평");
    assert!(c.panel_display(Panel::Left).is_input);
    assert!(c.panel_display(Panel::Right).is_input);
}

#[test]
fn area_result_with_missing_operand_is_zero_pyeong() {
    let mut c = calc(TabId::Area, Panel::Left);
    press(&mut c, "7");
    let area = c.area_result().expect("area tab");
    assert_eq!(area.sqm, 0.0);
    assert_eq!(area.pyeong, 0.0);
    assert_eq!(c.summary(), Summary::AreaPrompt);
}

#[test]
fn clear_resets_both_sides_and_acknowledges() {
    let mut c = calc(TabId::Area, Panel::Left);
    press(&mut c, "3");
    c.handle(Event::SelectPanel(Panel::Right));
    press(&mut c, "4");
    assert_eq!(c.handle(Event::Clear), Feedback::Cleared);
    assert_eq!(c.raw(Panel::Left), "");
    assert_eq!(c.raw(Panel::Right), "");
    assert_eq!(c.active_panel(), Panel::Right);
    assert_eq!(c.handle(Event::Key(Key::Digit(1))), Feedback::Silent);
}

#[test]
fn display_values_and_result_bar() {
    let mut c = calc(TabId::Sqm, Panel::Right);
    let left = c.panel_display(Panel::Left);
    assert_eq!(left.value, "0");
    assert!(!left.is_input);
    assert_eq!(c.panel_display(Panel::Right).value, "0");

    press(&mut c, "1234");
    assert_eq!(c.panel_display(Panel::Right).value, "1234");
    let bar = c.result_bar().expect("conversion tab");
    assert_eq!(bar.right, "1,234");
    assert_eq!(bar.left, "4,079.3387");
}

#[test]
fn summary_names_direction() {
    let tr = Translator::new("ko");
    let mut c = calc(TabId::Sqm, Panel::Right);
    assert_eq!(c.summary_label(&tr), "평 → m² 변환");
    c.handle(Event::SelectPanel(Panel::Left));
    assert_eq!(c.summary_label(&tr), "m² → 평 변환");

    let en = Translator::new("en");
    c.handle(Event::SelectTab(TabId::Ac));
    assert_eq!(c.summary_label(&en), "pyeong → ac");
}

#[test]
fn reference_tab_has_no_input_state() {
    let mut c = calc(TabId::Kukpyeong, Panel::Right);
    press(&mut c, "12");
    c.handle(Event::SelectPanel(Panel::Left));
    assert_eq!(c.raw(Panel::Left), "");
    assert_eq!(c.raw(Panel::Right), "");
    assert_eq!(c.summary(), Summary::Reference);
    assert!(c.result_bar().is_none());
    assert_eq!(c.derived_value(), "");
}

#[test]
fn apartment_table_shows_both_figures() {
    let rows = apartment_rows();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].entry.label, "84타입");
    assert_eq!(rows[0].entry.approx_pyeong, 25);
    assert_eq!(rows[0].exact_pyeong, "25.4");
    assert_eq!(rows[1].exact_pyeong, "17.8");
    assert_eq!(rows[8].exact_pyeong, "53.2");
    assert_eq!(APARTMENT_TYPES[8].supply_range, "약 228~235m²");
}

#[test]
fn apartment_row_cells_carry_stored_and_computed_pyeong() {
    let rows = apartment_rows();
    let ko = Translator::new("ko");
    assert_eq!(
        rows[0].cells(&ko),
        [
            "84타입".to_string(),
            "전용 84m²".to_string(),
            "25.4평".to_string(),
            "약 25평".to_string(),
            "공급면적 약 109~115m²".to_string(),
        ]
    );
    let en = Translator::new("en");
    let cells = rows[1].cells(&en);
    assert_eq!(cells[2], "17.8pyeong");
    assert_eq!(cells[3], "approx. 18pyeong");
}

#[test]
fn area_result_from_dimensions_matches_calculator() {
    let mut c = calc(TabId::Area, Panel::Left);
    press(&mut c, "12.5");
    c.handle(Event::SelectPanel(Panel::Right));
    press(&mut c, "8");
    assert_eq!(c.area_result(), Some(AreaResult::from_dimensions(12.5, 8.0)));

    let tr = Translator::new("ko");
    let area = AreaResult::from_dimensions(10.0, 10.0);
    assert_eq!(area.render(&tr), "100 m² = 30.25 평");
    assert_eq!(c.summary(), Summary::Area(AreaResult::from_dimensions(12.5, 8.0)));

    let flat = AreaResult::from_dimensions(-3.0, 4.0);
    assert_eq!(flat.sqm, -12.0);
    assert_eq!(flat.pyeong, 0.0);
}

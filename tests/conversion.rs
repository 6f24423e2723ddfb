//! 평 ↔ m²/ha/ac 환산 및 숫자 포맷 회귀 테스트.
use pyeong_calculator::conversion::{convert, parse_area_unit, ConversionError};
use pyeong_calculator::format::format_number;
use pyeong_calculator::units::{
    ac_to_pyeong, area_to_pyeong, convert_area, ha_to_pyeong, pyeong_to_ac, pyeong_to_ha,
    pyeong_to_sqm, sqm_to_pyeong, AreaUnit,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:e}, tol {rel_tol})"
    );
}

#[test]
fn round_trip_laws_hold() {
    for p in [0.0, 0.5, 1.0, 25.0, 1234.5678, 3.0e9] {
        assert_close("sqm", sqm_to_pyeong(pyeong_to_sqm(p)), p, 1e-12);
        assert_close("ha", ha_to_pyeong(pyeong_to_ha(p)), p, 1e-12);
        assert_close("ac", ac_to_pyeong(pyeong_to_ac(p)), p, 1e-12);
    }
}

#[test]
fn rate_constants() {
    assert_close("1평", pyeong_to_sqm(1.0), 3.305785, 1e-15);
    assert_close("1평 ha", pyeong_to_ha(1.0), 0.000_330_578_5, 1e-15);
    assert_close("1평 ac", pyeong_to_ac(1.0), 0.000_816_887, 1e-15);
}

#[test]
fn area_from_dimensions() {
    assert_close("10x10", area_to_pyeong(10.0, 10.0), 100.0 / 3.305785, 1e-12);
    assert_eq!(format_number(area_to_pyeong(10.0, 10.0), 2), "30.25");
}

#[test]
fn negative_input_is_not_rejected() {
    assert_close("neg", pyeong_to_sqm(-2.0), -6.61157, 1e-12);
    assert!(sqm_to_pyeong(f64::NAN).is_nan());
}

#[test]
fn generic_conversion_goes_through_pyeong() {
    // 1 ha = 10,000 m²
    assert_close(
        "ha→m²",
        convert_area(1.0, AreaUnit::Hectare, AreaUnit::SquareMeter),
        10_000.0,
        1e-9,
    );
    assert_close(
        "m²→py",
        convert_area(84.0, AreaUnit::SquareMeter, AreaUnit::Pyeong),
        84.0 / 3.305785,
        1e-12,
    );
    assert_eq!(convert_area(7.0, AreaUnit::Acre, AreaUnit::Acre), 7.0);
}

#[test]
fn unit_strings() {
    assert_eq!(parse_area_unit("M2").unwrap(), AreaUnit::SquareMeter);
    assert_eq!(parse_area_unit("평").unwrap(), AreaUnit::Pyeong);
    assert_eq!(parse_area_unit(" acre ").unwrap(), AreaUnit::Acre);
    assert_eq!(parse_area_unit("sqm").unwrap().symbol(), "m²");
    assert_eq!(parse_area_unit("hectare").unwrap().symbol(), "ha");
    assert_eq!(parse_area_unit("py").unwrap().symbol(), "평");
    let v = convert(33.05785, "m2", "py").expect("convert");
    assert_close("m2→py", v, 10.0, 1e-12);
    assert!(matches!(
        convert(1.0, "ft2", "py"),
        Err(ConversionError::UnknownUnit(u)) if u == "ft2"
    ));
}

#[test]
fn format_number_contract() {
    assert_eq!(format_number(0.0, 2), "0");
    assert_eq!(format_number(f64::NAN, 2), "0");
    assert_eq!(format_number(f64::INFINITY, 2), "0");
    assert_eq!(format_number(1234.5, 2), "1,234.5");
    assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
    assert_eq!(format_number(3.004, 2), "3");
    assert_eq!(format_number(pyeong_to_sqm(10.0), 4), "33.0579");
    // 정확한 중간값은 0에서 먼 쪽으로
    assert_eq!(format_number(123_456_789.125, 2), "123,456,789.13");
}

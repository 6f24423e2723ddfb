use crate::units::{convert_area, AreaUnit};

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `m2`, `ha`, `ac`, `py`, `평` 등을 사용할 수 있다.
pub fn convert(value: f64, from_unit_str: &str, to_unit_str: &str) -> Result<f64, ConversionError> {
    let from = parse_area_unit(from_unit_str)?;
    let to = parse_area_unit(to_unit_str)?;
    Ok(convert_area(value, from, to))
}

/// 면적 단위 문자열을 해석한다. 대소문자는 구분하지 않는다.
pub fn parse_area_unit(s: &str) -> Result<AreaUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m2" | "m^2" | "sqm" | "m²" | "㎡" => Ok(AreaUnit::SquareMeter),
        "ha" | "hectare" => Ok(AreaUnit::Hectare),
        "ac" | "acre" => Ok(AreaUnit::Acre),
        "py" | "pyeong" | "평" => Ok(AreaUnit::Pyeong),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

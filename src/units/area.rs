use serde::{Deserialize, Serialize};

/// 1평 = 3.305785 m²
pub const PYEONG_TO_SQM: f64 = 3.305785;
/// 1평 = 0.0003305785 ha
pub const PYEONG_TO_HA: f64 = 0.000_330_578_5;
/// 1평 = 0.000816887 ac
pub const PYEONG_TO_AC: f64 = 0.000_816_887;

/// 면적 단위. 내부 기준은 평이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    Hectare,
    Acre,
    Pyeong,
}

impl AreaUnit {
    /// 화면 표시용 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::Hectare => "ha",
            AreaUnit::Acre => "ac",
            AreaUnit::Pyeong => "평",
        }
    }
}

/// 평 → 제곱미터
pub fn pyeong_to_sqm(pyeong: f64) -> f64 {
    pyeong * PYEONG_TO_SQM
}

/// 제곱미터 → 평
pub fn sqm_to_pyeong(sqm: f64) -> f64 {
    sqm / PYEONG_TO_SQM
}

/// 평 → 헥타르
pub fn pyeong_to_ha(pyeong: f64) -> f64 {
    pyeong * PYEONG_TO_HA
}

/// 헥타르 → 평
pub fn ha_to_pyeong(ha: f64) -> f64 {
    ha / PYEONG_TO_HA
}

/// 평 → 에이커
pub fn pyeong_to_ac(pyeong: f64) -> f64 {
    pyeong * PYEONG_TO_AC
}

/// 에이커 → 평
pub fn ac_to_pyeong(ac: f64) -> f64 {
    ac / PYEONG_TO_AC
}

/// 넓이(m) × 높이(m)를 평으로 환산한다. 음수나 NaN도 그대로 계산한다.
pub fn area_to_pyeong(width: f64, height: f64) -> f64 {
    (width * height) / PYEONG_TO_SQM
}

fn to_pyeong(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => sqm_to_pyeong(value),
        AreaUnit::Hectare => ha_to_pyeong(value),
        AreaUnit::Acre => ac_to_pyeong(value),
        AreaUnit::Pyeong => value,
    }
}

fn from_pyeong(pyeong: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => pyeong_to_sqm(pyeong),
        AreaUnit::Hectare => pyeong_to_ha(pyeong),
        AreaUnit::Acre => pyeong_to_ac(pyeong),
        AreaUnit::Pyeong => pyeong,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    if from == to {
        return value;
    }
    let py = to_pyeong(value, from);
    from_pyeong(py, to)
}

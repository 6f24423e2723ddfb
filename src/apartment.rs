//! 국민평형(대표 아파트 타입) 참고표.

use crate::format::format_number;
use crate::i18n::{keys, Translator};
use crate::units::sqm_to_pyeong;

/// 아파트 타입 한 줄. 모두 정적 데이터이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApartmentType {
    /// "84타입" 등
    pub label: &'static str,
    /// 전용면적 m²
    pub exclusive_sqm: f64,
    /// 흔히 부르는 대략적인 평수
    pub approx_pyeong: u32,
    /// 공급면적 참고 문구
    pub supply_range: &'static str,
}

pub const APARTMENT_TYPES: [ApartmentType; 9] = [
    ApartmentType {
        label: "84타입",
        exclusive_sqm: 84.0,
        approx_pyeong: 25,
        supply_range: "약 109~115m²",
    },
    ApartmentType {
        label: "59타입",
        exclusive_sqm: 59.0,
        approx_pyeong: 18,
        supply_range: "약 74~81m²",
    },
    ApartmentType {
        label: "39타입",
        exclusive_sqm: 39.0,
        approx_pyeong: 12,
        supply_range: "약 49~52m²",
    },
    ApartmentType {
        label: "49타입",
        exclusive_sqm: 49.0,
        approx_pyeong: 15,
        supply_range: "약 62~65m²",
    },
    ApartmentType {
        label: "74타입",
        exclusive_sqm: 74.0,
        approx_pyeong: 22,
        supply_range: "약 96~100m²",
    },
    ApartmentType {
        label: "101타입",
        exclusive_sqm: 101.0,
        approx_pyeong: 31,
        supply_range: "약 132~138m²",
    },
    ApartmentType {
        label: "114타입",
        exclusive_sqm: 114.0,
        approx_pyeong: 34,
        supply_range: "약 148~155m²",
    },
    ApartmentType {
        label: "135타입",
        exclusive_sqm: 135.0,
        approx_pyeong: 41,
        supply_range: "약 175~182m²",
    },
    ApartmentType {
        label: "176타입",
        exclusive_sqm: 176.0,
        approx_pyeong: 53,
        supply_range: "약 228~235m²",
    },
];

/// 화면 표시용 행.
/// 저장된 대략 평수와 전용면적에서 다시 계산한 평수를 함께 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ApartmentRow {
    pub entry: ApartmentType,
    /// `sqm_to_pyeong(exclusive_sqm)`를 소수 1자리로 포맷한 값
    pub exact_pyeong: String,
}

impl ApartmentType {
    pub fn exact_pyeong(&self) -> f64 {
        sqm_to_pyeong(self.exclusive_sqm)
    }

    pub fn to_row(&self) -> ApartmentRow {
        ApartmentRow {
            entry: *self,
            exact_pyeong: format_number(self.exact_pyeong(), 1),
        }
    }
}

/// 표 순서 그대로의 표시용 행 목록.
pub fn apartment_rows() -> Vec<ApartmentRow> {
    APARTMENT_TYPES.iter().map(ApartmentType::to_row).collect()
}

impl ApartmentRow {
    /// 표 한 줄의 칸: 타입, 전용면적, 계산 평수, 대략 평수, 공급면적.
    /// 두 평수는 맞추지 않고 그대로 나란히 보여준다.
    pub fn cells(&self, tr: &Translator) -> [String; 5] {
        let e = &self.entry;
        let unit = tr.t(keys::UNIT_PYEONG);
        [
            e.label.to_string(),
            format!("{} {}m²", tr.t(keys::KUK_EXCLUSIVE), e.exclusive_sqm),
            format!("{}{unit}", self.exact_pyeong),
            format!("{} {}{unit}", tr.t(keys::KUK_APPROX), e.approx_pyeong),
            format!("{} {}", tr.t(keys::KUK_SUPPLY), e.supply_range),
        ]
    }
}

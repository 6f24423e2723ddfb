//! 탭(변환 모드) 정의와 탭별 단위 라벨/변환 함수 레지스트리.

use serde::{Deserialize, Serialize};

use crate::i18n::keys;
use crate::units::{
    ac_to_pyeong, ha_to_pyeong, pyeong_to_ac, pyeong_to_ha, pyeong_to_sqm, sqm_to_pyeong,
};

/// 변환 모드. 직렬화 시 설정 파일과 같은 식별자를 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    /// 제곱미터 ↔ 평
    Sqm,
    /// 헥타르 ↔ 평
    Ha,
    /// 에이커 ↔ 평
    Ac,
    /// 넓이 × 높이 면적계산
    Area,
    /// 국민평형 아파트 참고표
    Kukpyeong,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Sqm,
        TabId::Ha,
        TabId::Ac,
        TabId::Area,
        TabId::Kukpyeong,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TabId::Sqm => "sqm",
            TabId::Ha => "ha",
            TabId::Ac => "ac",
            TabId::Area => "area",
            TabId::Kukpyeong => "kukpyeong",
        }
    }

    /// 좌/우 값이 서로 환산되는 탭인지 여부.
    pub fn is_conversion(&self) -> bool {
        matches!(self, TabId::Sqm | TabId::Ha | TabId::Ac)
    }

    pub fn config(&self) -> &'static TabConfig {
        tab_config(*self)
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TabId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// 탭 하나의 표시 라벨과 변환 함수 쌍. 라벨은 i18n 키로 보관한다.
#[derive(Debug, Clone, Copy)]
pub struct TabConfig {
    pub id: TabId,
    pub label_key: &'static str,
    pub left_unit_key: &'static str,
    pub right_unit_key: &'static str,
    pub left_to_right: fn(f64) -> f64,
    pub right_to_left: fn(f64) -> f64,
}

fn identity(value: f64) -> f64 {
    value
}

pub static TAB_CONFIGS: [TabConfig; 5] = [
    TabConfig {
        id: TabId::Sqm,
        label_key: keys::TAB_SQM,
        left_unit_key: keys::UNIT_SQM,
        right_unit_key: keys::UNIT_PYEONG,
        left_to_right: sqm_to_pyeong,
        right_to_left: pyeong_to_sqm,
    },
    TabConfig {
        id: TabId::Ha,
        label_key: keys::TAB_HA,
        left_unit_key: keys::UNIT_HA,
        right_unit_key: keys::UNIT_PYEONG,
        left_to_right: ha_to_pyeong,
        right_to_left: pyeong_to_ha,
    },
    TabConfig {
        id: TabId::Ac,
        label_key: keys::TAB_AC,
        left_unit_key: keys::UNIT_AC,
        right_unit_key: keys::UNIT_PYEONG,
        left_to_right: ac_to_pyeong,
        right_to_left: pyeong_to_ac,
    },
    TabConfig {
        id: TabId::Area,
        label_key: keys::TAB_AREA,
        left_unit_key: keys::UNIT_WIDTH,
        right_unit_key: keys::UNIT_HEIGHT,
        left_to_right: identity,
        right_to_left: identity,
    },
    TabConfig {
        id: TabId::Kukpyeong,
        label_key: keys::TAB_KUKPYEONG,
        left_unit_key: keys::UNIT_NONE,
        right_unit_key: keys::UNIT_NONE,
        left_to_right: identity,
        right_to_left: identity,
    },
];

/// 탭 식별자에 해당하는 설정을 돌려준다.
pub fn tab_config(id: TabId) -> &'static TabConfig {
    match id {
        TabId::Sqm => &TAB_CONFIGS[0],
        TabId::Ha => &TAB_CONFIGS[1],
        TabId::Ac => &TAB_CONFIGS[2],
        TabId::Area => &TAB_CONFIGS[3],
        TabId::Kukpyeong => &TAB_CONFIGS[4],
    }
}

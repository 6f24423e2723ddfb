//! 면적 단위 정의 및 변환 모듈.

pub mod area;

pub use area::{
    ac_to_pyeong, area_to_pyeong, convert_area, ha_to_pyeong, pyeong_to_ac, pyeong_to_ha,
    pyeong_to_sqm, sqm_to_pyeong, AreaUnit, PYEONG_TO_AC, PYEONG_TO_HA, PYEONG_TO_SQM,
};

//! 평수 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 사용한다.

pub mod apartment;
pub mod app;
pub mod calculator;
pub mod config;
pub mod conversion;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod tabs;
pub mod ui_cli;
pub mod units;

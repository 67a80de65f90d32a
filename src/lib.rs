//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면에서도 재사용한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod pump;
pub mod quantity;
pub mod ui_cli;
pub mod units;
pub mod water;

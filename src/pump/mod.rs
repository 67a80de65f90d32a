//! 펌프 운전 관련 계산 모듈 모음.
//! 운전 시간 기반 전력/요금 계산, 유량 이상(누수) 판정, 운전 상태 전환,
//! 점검 일정과 경보 판정으로 구성한다.

pub mod flow_anomaly;
pub mod maintenance;
pub mod pump_control;
pub mod pump_usage;

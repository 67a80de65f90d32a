use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pump::pump_control::PumpStatus;

/// 점검 일정 계산 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceError {
    /// 점검 주기가 0일
    ZeroInterval,
    /// 날짜 범위를 넘어섬
    DateOutOfRange,
}

impl std::fmt::Display for MaintenanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceError::ZeroInterval => write!(f, "점검 주기는 1일 이상이어야 합니다"),
            MaintenanceError::DateOutOfRange => write!(f, "다음 점검일이 날짜 범위를 벗어납니다"),
        }
    }
}

impl std::error::Error for MaintenanceError {}

/// 마지막 점검일에 주기를 더해 다음 점검일을 구한다.
pub fn next_maintenance(
    last_maintenance: NaiveDate,
    interval_days: u32,
) -> Result<NaiveDate, MaintenanceError> {
    if interval_days == 0 {
        return Err(MaintenanceError::ZeroInterval);
    }
    last_maintenance
        .checked_add_days(Days::new(u64::from(interval_days)))
        .ok_or(MaintenanceError::DateOutOfRange)
}

/// 펌프 경보 기준.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpAlertThresholds {
    /// 이 온도를 넘으면 과열 경보 [°C]
    pub high_temperature_c: f64,
    /// 다음 점검까지 남은 일수가 이보다 적으면 점검 예고
    pub maintenance_notice_days: i64,
    /// 운전 중 효율이 이보다 낮으면 효율 저하 안내 [%]
    pub low_efficiency_percent: f64,
}

impl Default for PumpAlertThresholds {
    fn default() -> Self {
        Self {
            high_temperature_c: 60.0,
            maintenance_notice_days: 7,
            low_efficiency_percent: 85.0,
        }
    }
}

/// 경보 판단에 쓰는 펌프 현재값.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpSnapshot {
    pub name: String,
    pub status: PumpStatus,
    /// 본체 온도 [°C]
    pub temperature_c: f64,
    /// 운전 효율 [%]
    pub efficiency_percent: f64,
    pub next_maintenance: NaiveDate,
}

/// 경보 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Error,
    Warning,
    Info,
}

/// 경보 종류와 판정 근거 값.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertKind {
    /// 고장 상태
    Fault,
    HighTemperature { temperature_c: f64 },
    /// 점검일이 가까움. 지난 경우 남은 일수는 음수
    MaintenanceDue { due: NaiveDate, days_left: i64 },
    LowEfficiency { efficiency_percent: f64 },
}

impl AlertKind {
    pub fn level(&self) -> AlertLevel {
        match self {
            AlertKind::Fault => AlertLevel::Error,
            AlertKind::HighTemperature { .. } | AlertKind::MaintenanceDue { .. } => {
                AlertLevel::Warning
            }
            AlertKind::LowEfficiency { .. } => AlertLevel::Info,
        }
    }
}

/// 펌프 한 대에 대한 경보.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpAlert {
    pub pump: String,
    pub kind: AlertKind,
}

impl PumpAlert {
    pub fn level(&self) -> AlertLevel {
        self.kind.level()
    }
}

impl std::fmt::Display for PumpAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = &self.pump;
        match &self.kind {
            AlertKind::Fault => write!(
                f,
                "{name} 고장: 펌프가 예기치 않게 멈췄습니다. 전압과 전류를 점검하세요."
            ),
            AlertKind::HighTemperature { temperature_c } => {
                write!(f, "{name} 과열: 현재 {temperature_c}°C, 정상 운전은 55°C 이하입니다.")
            }
            AlertKind::MaintenanceDue { due, days_left } => write!(
                f,
                "{name} 점검 예정일 {} ({days_left}일 남음)",
                due.format("%Y-%m-%d")
            ),
            AlertKind::LowEfficiency { efficiency_percent } => write!(
                f,
                "{name} 효율 {efficiency_percent}%로 운전 중입니다. 점검을 고려하세요."
            ),
        }
    }
}

/// 현재값과 기준일로 경보 목록을 만든다. 한 펌프에서 여러 경보가 동시에 날 수 있다.
pub fn pump_alerts(
    snapshot: &PumpSnapshot,
    today: NaiveDate,
    thresholds: &PumpAlertThresholds,
) -> Vec<PumpAlert> {
    let mut kinds = Vec::new();
    if snapshot.status == PumpStatus::Error {
        kinds.push(AlertKind::Fault);
    }
    if snapshot.temperature_c > thresholds.high_temperature_c {
        kinds.push(AlertKind::HighTemperature {
            temperature_c: snapshot.temperature_c,
        });
    }
    let days_left = snapshot
        .next_maintenance
        .signed_duration_since(today)
        .num_days();
    if days_left < thresholds.maintenance_notice_days && snapshot.status != PumpStatus::Maintenance
    {
        kinds.push(AlertKind::MaintenanceDue {
            due: snapshot.next_maintenance,
            days_left,
        });
    }
    if snapshot.status == PumpStatus::Running
        && snapshot.efficiency_percent < thresholds.low_efficiency_percent
    {
        kinds.push(AlertKind::LowEfficiency {
            efficiency_percent: snapshot.efficiency_percent,
        });
    }
    kinds
        .into_iter()
        .map(|kind| PumpAlert {
            pump: snapshot.name.clone(),
            kind,
        })
        .collect()
}

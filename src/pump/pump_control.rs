use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 펌프 운전 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpStatus {
    Running,
    Idle,
    Maintenance,
    Error,
}

impl PumpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PumpStatus::Running => "running",
            PumpStatus::Idle => "idle",
            PumpStatus::Maintenance => "maintenance",
            PumpStatus::Error => "error",
        }
    }
}

impl FromStr for PumpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(PumpStatus::Running),
            "idle" => Ok(PumpStatus::Idle),
            "maintenance" => Ok(PumpStatus::Maintenance),
            "error" => Ok(PumpStatus::Error),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 운전자가 내리는 제어 명령.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
    Maintenance,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop => "stop",
            ControlAction::Maintenance => "maintenance",
        }
    }
}

impl FromStr for ControlAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(ControlAction::Start),
            "stop" => Ok(ControlAction::Stop),
            "maintenance" => Ok(ControlAction::Maintenance),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for ControlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 허용되지 않는 상태 전환.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// 현재 상태에서 명령을 수행할 수 없음
    InvalidTransition {
        action: ControlAction,
        from: PumpStatus,
    },
    /// 점검 중이 아닌 펌프의 점검 완료 처리
    NotInMaintenance(PumpStatus),
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlError::InvalidTransition { action, from } => {
                write!(f, "{from} 상태에서는 {action} 명령을 수행할 수 없습니다")
            }
            ControlError::NotInMaintenance(status) => {
                write!(f, "점검 중인 펌프가 아닙니다 (현재 {status})")
            }
        }
    }
}

impl std::error::Error for ControlError {}

/// 현재 상태에서 명령이 허용되는지 판단한다.
///
/// 시작은 대기에서만, 정지는 운전 중에서만 가능하다. 점검 전환은 점검 중이
/// 아닌 모든 상태(대기, 운전, 고장)에서 가능하다.
pub fn can_apply(current: PumpStatus, action: ControlAction) -> bool {
    match action {
        ControlAction::Start => current == PumpStatus::Idle,
        ControlAction::Stop => current == PumpStatus::Running,
        ControlAction::Maintenance => matches!(
            current,
            PumpStatus::Idle | PumpStatus::Running | PumpStatus::Error
        ),
    }
}

/// 명령을 적용한 뒤의 상태.
pub fn apply_control(
    current: PumpStatus,
    action: ControlAction,
) -> Result<PumpStatus, ControlError> {
    if !can_apply(current, action) {
        return Err(ControlError::InvalidTransition {
            action,
            from: current,
        });
    }
    Ok(match action {
        ControlAction::Start => PumpStatus::Running,
        ControlAction::Stop => PumpStatus::Idle,
        ControlAction::Maintenance => PumpStatus::Maintenance,
    })
}

/// 점검 완료 처리. 점검 중인 펌프만 대기로 돌아간다.
pub fn complete_maintenance(current: PumpStatus) -> Result<PumpStatus, ControlError> {
    match current {
        PumpStatus::Maintenance => Ok(PumpStatus::Idle),
        other => Err(ControlError::NotInMaintenance(other)),
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pump::flow_anomaly::FlowAnomalyThresholds;
use crate::pump::maintenance::PumpAlertThresholds;
use crate::units::*;
use crate::water::irrigation_schedule::{ScheduleError, SlotTime};
use crate::water::recommendations::RecommendationThresholds;
use crate::water::usage_status::{UsagePolicy, UsagePolicyError};
use crate::water::{CropTable, CropTableError, EstimatorPolicy, PolicyError};

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 입력/출력에 쓰는 기본 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub area: AreaUnit,
    pub volume: VolumeUnit,
    pub temperature: TemperatureUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            area: AreaUnit::SquareMeter,
            volume: VolumeUnit::Liter,
            temperature: TemperatureUnit::Celsius,
        }
    }
}

/// 관개 일정 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDefaults {
    /// 펌프 유량 [L/s]. 없으면 일정 계획을 건너뛴다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pump_flow_l_per_s: Option<f64>,
    /// 가동 시각 목록 (HH:MM)
    pub slots: Vec<String>,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            pump_flow_l_per_s: None,
            slots: vec!["06:00".to_string(), "17:00".to_string()],
        }
    }
}

impl ScheduleDefaults {
    /// 가동 시각 문자열을 파싱한다. 비어 있으면 오류.
    pub fn parsed_slots(&self) -> Result<Vec<SlotTime>, ScheduleError> {
        if self.slots.is_empty() {
            return Err(ScheduleError::NoSlots);
        }
        self.slots.iter().map(|s| s.parse::<SlotTime>()).collect()
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if let Some(flow) = self.pump_flow_l_per_s {
            if !(flow.is_finite() && flow > 0.0) {
                return Err(ScheduleError::InvalidPumpFlow(flow));
            }
        }
        self.parsed_slots().map(|_| ())
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 내장 기준표에 덧씌울 작물표(TOML) 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_table: Option<PathBuf>,
    pub default_units: DefaultUnits,
    pub policy: EstimatorPolicy,
    pub recommendation: RecommendationThresholds,
    pub schedule: ScheduleDefaults,
    pub flow_anomaly: FlowAnomalyThresholds,
    pub pump_alert: PumpAlertThresholds,
    pub usage: UsagePolicy,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 정책 값 오류
    Policy(PolicyError),
    /// 작물표 오류
    CropTable(CropTableError),
    /// 관개 일정 기본값 오류
    Schedule(ScheduleError),
    /// 급수 평가 기준 오류
    Usage(UsagePolicyError),
    /// 범위를 벗어난 기준값
    InvalidValue { key: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
            ConfigError::Policy(e) => write!(f, "정책 설정 오류: {e}"),
            ConfigError::CropTable(e) => write!(f, "{e}"),
            ConfigError::Schedule(e) => write!(f, "일정 설정 오류: {e}"),
            ConfigError::Usage(e) => write!(f, "급수 기준 설정 오류: {e}"),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "설정값 {key} = {value} 이(가) 허용 범위를 벗어났습니다")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

impl From<PolicyError> for ConfigError {
    fn from(value: PolicyError) -> Self {
        ConfigError::Policy(value)
    }
}

impl From<CropTableError> for ConfigError {
    fn from(value: CropTableError) -> Self {
        ConfigError::CropTable(value)
    }
}

impl From<ScheduleError> for ConfigError {
    fn from(value: ScheduleError) -> Self {
        ConfigError::Schedule(value)
    }
}

impl From<UsagePolicyError> for ConfigError {
    fn from(value: UsagePolicyError) -> Self {
        ConfigError::Usage(value)
    }
}

/// 지정 경로의 설정을 로드하거나 없으면 기본 설정을 그 경로에 만든다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content)
    } else {
        let cfg = Config::default();
        tracing::info!(path = %path.display(), "config not found, writing defaults");
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// TOML 문자열을 파싱하고 모든 구간을 검증한다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 정책, 일정, 판정 기준 값을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        self.schedule.validate()?;
        self.usage.validate()?;
        let flow = &self.flow_anomaly;
        check_value("flow_anomaly.low_ratio", flow.low_ratio, flow.low_ratio >= 0.0)?;
        check_value(
            "flow_anomaly.high_ratio",
            flow.high_ratio,
            flow.high_ratio > flow.low_ratio,
        )?;
        let flood = self.recommendation.flood_volume_alert_liters;
        check_value("recommendation.flood_volume_alert_liters", flood, flood >= 0.0)?;
        let alert = &self.pump_alert;
        check_value("pump_alert.high_temperature_c", alert.high_temperature_c, true)?;
        check_value(
            "pump_alert.low_efficiency_percent",
            alert.low_efficiency_percent,
            (0.0..=100.0).contains(&alert.low_efficiency_percent),
        )?;
        Ok(())
    }

    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    /// 내장 기준표에 설정된 작물표 파일을 덧씌워 반환한다.
    pub fn crop_table(&self) -> Result<CropTable, ConfigError> {
        let mut table = CropTable::builtin();
        if let Some(path) = &self.crop_table {
            let extra = CropTable::load(path)?;
            tracing::debug!(path = %path.display(), crops = extra.len(), "crop table loaded");
            table.merge(extra);
        }
        Ok(table)
    }
}

fn check_value(key: &'static str, value: f64, in_range: bool) -> Result<(), ConfigError> {
    if value.is_finite() && in_range {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { key, value })
    }
}

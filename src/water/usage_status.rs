use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::water::irrigation_schedule::{run_duration_minutes, SlotTime};

/// 작물별 적정 급수 범위 [L].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageBand {
    pub min_liters: f64,
    pub max_liters: f64,
}

impl UsageBand {
    pub const fn new(min_liters: f64, max_liters: f64) -> Self {
        Self {
            min_liters,
            max_liters,
        }
    }
}

/// 급수 기록 평가 기준. `bands`를 지정하면 내장 범위 전체를 대체한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsagePolicy {
    /// 물 단가 [통화/L]
    pub water_price_per_liter: f64,
    pub bands: BTreeMap<String, UsageBand>,
}

impl Default for UsagePolicy {
    fn default() -> Self {
        let bands = [
            ("rice", UsageBand::new(7000.0, 10000.0)),
            ("wheat", UsageBand::new(4000.0, 6000.0)),
            ("corn", UsageBand::new(3000.0, 5000.0)),
            ("cotton", UsageBand::new(5000.0, 7500.0)),
            ("tomato", UsageBand::new(3500.0, 5500.0)),
        ]
        .into_iter()
        .map(|(crop, band)| (crop.to_string(), band))
        .collect();
        Self {
            water_price_per_liter: 0.06,
            bands,
        }
    }
}

/// 급수 기준 값이 잘못된 경우.
#[derive(Debug, Clone, PartialEq)]
pub enum UsagePolicyError {
    /// 단가가 음수이거나 유한하지 않음
    InvalidPrice(f64),
    /// 범위 하한이 상한보다 크거나 음수
    InvalidBand { crop: String, min: f64, max: f64 },
}

impl std::fmt::Display for UsagePolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsagePolicyError::InvalidPrice(v) => write!(f, "물 단가는 0 이상이어야 합니다: {v}"),
            UsagePolicyError::InvalidBand { crop, min, max } => {
                write!(f, "{crop} 적정 급수 범위가 잘못되었습니다: {min}~{max}")
            }
        }
    }
}

impl std::error::Error for UsagePolicyError {}

impl UsagePolicy {
    pub fn validate(&self) -> Result<(), UsagePolicyError> {
        let price = self.water_price_per_liter;
        if !(price.is_finite() && price >= 0.0) {
            return Err(UsagePolicyError::InvalidPrice(price));
        }
        for (crop, band) in &self.bands {
            let ok = band.min_liters.is_finite()
                && band.max_liters.is_finite()
                && band.min_liters >= 0.0
                && band.min_liters <= band.max_liters;
            if !ok {
                return Err(UsagePolicyError::InvalidBand {
                    crop: crop.clone(),
                    min: band.min_liters,
                    max: band.max_liters,
                });
            }
        }
        Ok(())
    }

    /// 작물 이름(대소문자·앞뒤 공백 무시)으로 범위를 찾는다.
    pub fn band(&self, crop: &str) -> Option<&UsageBand> {
        let key = crop.trim().to_lowercase();
        self.bands
            .iter()
            .find(|(name, _)| name.trim().to_lowercase() == key)
            .map(|(_, band)| band)
    }
}

/// 급수량 평가.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageStatus {
    Underused,
    Optimal,
    Overused,
}

impl UsageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageStatus::Underused => "underused",
            UsageStatus::Optimal => "optimal",
            UsageStatus::Overused => "overused",
        }
    }
}

impl std::fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 범위가 없는 작물은 적정으로 본다. 경계값은 적정에 포함된다.
pub fn classify_usage(policy: &UsagePolicy, crop: &str, water_used_liters: f64) -> UsageStatus {
    match policy.band(crop) {
        None => UsageStatus::Optimal,
        Some(band) if water_used_liters < band.min_liters => UsageStatus::Underused,
        Some(band) if water_used_liters > band.max_liters => UsageStatus::Overused,
        Some(_) => UsageStatus::Optimal,
    }
}

/// 급수 기록 한 건.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageLogInput {
    pub crop_type: String,
    /// 사용한 물 [L], 0 초과
    pub water_used_liters: f64,
    pub start: SlotTime,
    pub end: SlotTime,
}

/// 급수 기록 평가 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageLogResult {
    pub status: UsageStatus,
    pub duration_minutes: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsageError {
    /// 사용량이 0 이하이거나 유한하지 않음
    InvalidVolume(f64),
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageError::InvalidVolume(v) => write!(f, "사용량은 0보다 커야 합니다: {v}"),
        }
    }
}

impl std::error::Error for UsageError {}

/// 급수 기록의 상태, 가동 시간, 물 비용을 계산한다.
pub fn evaluate_usage(
    policy: &UsagePolicy,
    input: &UsageLogInput,
) -> Result<UsageLogResult, UsageError> {
    let liters = input.water_used_liters;
    if !(liters.is_finite() && liters > 0.0) {
        return Err(UsageError::InvalidVolume(liters));
    }
    Ok(UsageLogResult {
        status: classify_usage(policy, &input.crop_type, liters),
        duration_minutes: run_duration_minutes(input.start, input.end),
        cost: liters * policy.water_price_per_liter,
    })
}

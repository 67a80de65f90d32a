use serde::{Deserialize, Serialize};

use crate::water::crop_profile::{CropProfile, Season, SoilType};
use crate::water::policy::IrrigationMethod;
use crate::water::water_requirement::{CalculationInput, CalculationResult};

/// 권장사항 판단 기준.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// 담수(flood) 관개에서 점적 전환을 권할 일일 수량 [L]
    pub flood_volume_alert_liters: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            flood_volume_alert_liters: 5000.0,
        }
    }
}

/// 계산 결과에 따른 운영 권장사항.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// 작물 권장 토양이 현재 토양과 다름
    SwitchSoil { recommended: SoilType },
    /// 담수 관개 수량이 큼
    SwitchToDrip,
    /// 여름철 증발 손실
    IrrigateOffPeak,
    /// 강우 공제가 적용됨
    ReduceForRain,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::SwitchSoil { recommended } => {
                write!(f, "물 효율을 위해 {recommended} 토양 사용을 검토하세요")
            }
            Recommendation::SwitchToDrip => {
                write!(f, "점적 관개로 전환하면 물 사용량을 최대 40%까지 줄일 수 있습니다")
            }
            Recommendation::IrrigateOffPeak => {
                write!(f, "증발 손실을 줄이려면 이른 아침이나 저녁에 관개하세요")
            }
            Recommendation::ReduceForRain => {
                write!(f, "강우가 있으니 관개 일정을 조정하세요")
            }
        }
    }
}

/// 입력과 결과를 보고 권장사항 목록을 만든다.
pub fn recommend(
    profile: &CropProfile,
    input: &CalculationInput,
    result: &CalculationResult,
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if let Some(recommended) = profile.recommended_soil {
        if recommended != input.soil_type {
            out.push(Recommendation::SwitchSoil { recommended });
        }
    }
    if input.irrigation_method == Some(IrrigationMethod::Flood)
        && result.water_volume_liters > thresholds.flood_volume_alert_liters
    {
        out.push(Recommendation::SwitchToDrip);
    }
    if input.season == Some(Season::Summer) {
        out.push(Recommendation::IrrigateOffPeak);
    }
    if result.factors.rainfall_credit > 0.0 {
        out.push(Recommendation::ReduceForRain);
    }
    out
}

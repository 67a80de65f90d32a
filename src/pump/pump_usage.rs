use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 표준 펌프 정격. 마력 표기를 kW로 환산해 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpRating {
    HalfHp,
    OneHp,
    #[default]
    TwoHp,
    ThreeHp,
    FiveHp,
}

impl PumpRating {
    pub const ALL: [PumpRating; 5] = [
        PumpRating::HalfHp,
        PumpRating::OneHp,
        PumpRating::TwoHp,
        PumpRating::ThreeHp,
        PumpRating::FiveHp,
    ];

    /// 정격 전력 [kW]
    pub fn power_kw(&self) -> f64 {
        match self {
            PumpRating::HalfHp => 0.373,
            PumpRating::OneHp => 0.746,
            PumpRating::TwoHp => 1.492,
            PumpRating::ThreeHp => 2.238,
            PumpRating::FiveHp => 3.73,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PumpRating::HalfHp => "0.5hp",
            PumpRating::OneHp => "1hp",
            PumpRating::TwoHp => "2hp",
            PumpRating::ThreeHp => "3hp",
            PumpRating::FiveHp => "5hp",
        }
    }
}

impl FromStr for PumpRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect::<String>().to_lowercase();
        match compact.as_str() {
            "0.5hp" | ".5hp" | "half" => Ok(PumpRating::HalfHp),
            "1hp" => Ok(PumpRating::OneHp),
            "2hp" => Ok(PumpRating::TwoHp),
            "3hp" => Ok(PumpRating::ThreeHp),
            "5hp" => Ok(PumpRating::FiveHp),
            _ => Err(s.to_string()),
        }
    }
}

/// 운전 시간 기반 펌프 전력 사용량 입력.
#[derive(Debug, Clone)]
pub struct PumpUsageInput {
    /// 펌프 전력 [kW]
    pub power_kw: f64,
    /// 누적 운전 시간 [h]
    pub running_hours: f64,
    /// 전기 요금 [통화/kWh]
    pub electricity_rate: f64,
}

/// 펌프 전력 사용량 결과.
#[derive(Debug, Clone)]
pub struct PumpUsageResult {
    pub energy_kwh: f64,
    pub cost: f64,
    pub warnings: Vec<String>,
}

/// 펌프 정격 × 운전 시간으로 전력량과 요금을 계산한다. 음수 입력은 0으로 본다.
pub fn pump_usage(input: PumpUsageInput) -> PumpUsageResult {
    let mut warnings = Vec::new();
    if input.running_hours < 0.0 {
        warnings.push(format!(
            "운전 시간 {:.2} h가 음수라서 0으로 처리합니다.",
            input.running_hours
        ));
    }
    let energy_kwh = input.power_kw.max(0.0) * input.running_hours.max(0.0);
    let cost = energy_kwh * input.electricity_rate.max(0.0);
    PumpUsageResult {
        energy_kwh,
        cost,
        warnings,
    }
}

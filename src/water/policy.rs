use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 관개 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
    Furrow,
}

impl IrrigationMethod {
    pub const ALL: [IrrigationMethod; 4] = [
        IrrigationMethod::Drip,
        IrrigationMethod::Sprinkler,
        IrrigationMethod::Flood,
        IrrigationMethod::Furrow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => "drip",
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Flood => "flood",
            IrrigationMethod::Furrow => "furrow",
        }
    }
}

impl FromStr for IrrigationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drip" => Ok(IrrigationMethod::Drip),
            "sprinkler" => Ok(IrrigationMethod::Sprinkler),
            "flood" => Ok(IrrigationMethod::Flood),
            "furrow" => Ok(IrrigationMethod::Furrow),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 관개 방식별 효율(0~1]. 효율이 낮을수록 더 많은 물을 끌어와야 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrigationEfficiencyTable {
    pub drip: f64,
    pub sprinkler: f64,
    pub flood: f64,
    pub furrow: f64,
}

impl Default for IrrigationEfficiencyTable {
    fn default() -> Self {
        Self {
            drip: 0.9,
            sprinkler: 0.75,
            flood: 0.5,
            furrow: 0.65,
        }
    }
}

impl IrrigationEfficiencyTable {
    pub fn efficiency(&self, method: IrrigationMethod) -> f64 {
        match method {
            IrrigationMethod::Drip => self.drip,
            IrrigationMethod::Sprinkler => self.sprinkler,
            IrrigationMethod::Flood => self.flood,
            IrrigationMethod::Furrow => self.furrow,
        }
    }
}

/// 강우 공제를 적용하는 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallBasis {
    /// 면적을 곱한 누적값에서 `강우 × 공제계수`를 뺀다.
    RunningTotal,
    /// 단위 면적당 수요에서 강우 깊이를 뺀 뒤 면적을 곱한다.
    Depth,
}

/// 작물 기준 수요의 단위. 리터 환산 계수를 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseNeedUnit {
    /// mm/일. 1 mm × 1 m² = 1 L
    MillimetersPerDay,
    /// L/m²/일
    LitersPerSquareMeter,
    /// m³/ha/일. 1 m³/ha = 0.1 L/m²
    CubicMetersPerHectare,
}

impl BaseNeedUnit {
    /// 기준 단위 × m² 누적값을 리터로 바꾸는 계수.
    pub fn liters_factor(&self) -> f64 {
        match self {
            BaseNeedUnit::MillimetersPerDay | BaseNeedUnit::LitersPerSquareMeter => 1.0,
            BaseNeedUnit::CubicMetersPerHectare => 0.1,
        }
    }
}

/// 정책 값이 잘못된 경우.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// 저온 기준이 고온 기준보다 높음
    ThresholdOrder { cold_c: f64, hot_c: f64 },
    /// 음수 또는 유한하지 않은 상수
    InvalidConstant(&'static str),
    /// 관개 효율이 (0, 1] 범위 밖
    InvalidEfficiency(IrrigationMethod, f64),
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyError::ThresholdOrder { cold_c, hot_c } => {
                write!(f, "저온 기준({cold_c}°C)이 고온 기준({hot_c}°C)보다 높습니다")
            }
            PolicyError::InvalidConstant(name) => write!(f, "잘못된 정책 상수: {name}"),
            PolicyError::InvalidEfficiency(method, v) => {
                write!(f, "{method} 효율 {v}는 (0, 1] 범위여야 합니다")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// 물 수요 계산 정책. 호출자마다 다르던 상수를 모두 설정값으로 둔다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorPolicy {
    /// 이 온도 초과 시 온도 배율 적용 [°C]
    pub hot_threshold_c: f64,
    /// 이 온도 미만 시 온도 배율의 역수 적용 [°C]
    pub cold_threshold_c: f64,
    /// 강우 1 mm당 공제량
    pub rainfall_credit_factor: f64,
    pub rainfall_basis: RainfallBasis,
    pub base_need_unit: BaseNeedUnit,
    /// 펌프 전력 원단위 [kWh/L]
    pub pump_energy_kwh_per_liter: f64,
    /// 전기 요금 [통화/kWh]
    pub electricity_rate: f64,
    pub irrigation_efficiency: IrrigationEfficiencyTable,
}

impl Default for EstimatorPolicy {
    fn default() -> Self {
        Self {
            hot_threshold_c: 30.0,
            cold_threshold_c: 15.0,
            rainfall_credit_factor: 0.8,
            rainfall_basis: RainfallBasis::RunningTotal,
            base_need_unit: BaseNeedUnit::MillimetersPerDay,
            pump_energy_kwh_per_liter: 0.00185,
            electricity_rate: 0.12,
            irrigation_efficiency: IrrigationEfficiencyTable::default(),
        }
    }
}

impl EstimatorPolicy {
    /// 정책 상수의 범위를 검사한다.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.hot_threshold_c.is_finite() {
            return Err(PolicyError::InvalidConstant("hot_threshold_c"));
        }
        if !self.cold_threshold_c.is_finite() {
            return Err(PolicyError::InvalidConstant("cold_threshold_c"));
        }
        if self.cold_threshold_c > self.hot_threshold_c {
            return Err(PolicyError::ThresholdOrder {
                cold_c: self.cold_threshold_c,
                hot_c: self.hot_threshold_c,
            });
        }
        let constants = [
            ("rainfall_credit_factor", self.rainfall_credit_factor),
            ("pump_energy_kwh_per_liter", self.pump_energy_kwh_per_liter),
            ("electricity_rate", self.electricity_rate),
        ];
        for (name, v) in constants {
            if !v.is_finite() || v < 0.0 {
                return Err(PolicyError::InvalidConstant(name));
            }
        }
        for method in IrrigationMethod::ALL {
            let eff = self.irrigation_efficiency.efficiency(method);
            if !(eff > 0.0 && eff <= 1.0) {
                return Err(PolicyError::InvalidEfficiency(method, eff));
            }
        }
        Ok(())
    }

    /// 관개 방식에 대응하는 효율.
    pub fn efficiency_for(&self, method: IrrigationMethod) -> f64 {
        self.irrigation_efficiency.efficiency(method)
    }
}

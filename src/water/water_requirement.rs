use tracing::debug;

use crate::units::{to_square_meter, AreaUnit};
use crate::water::crop_profile::{CropCatalog, Season, SoilType};
use crate::water::policy::{EstimatorPolicy, IrrigationMethod, PolicyError, RainfallBasis};

/// 단위가 붙은 경작 면적.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandArea {
    pub value: f64,
    pub unit: AreaUnit,
}

impl LandArea {
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    pub fn square_meters(value: f64) -> Self {
        Self::new(value, AreaUnit::SquareMeter)
    }

    pub fn hectares(value: f64) -> Self {
        Self::new(value, AreaUnit::Hectare)
    }

    pub fn acres(value: f64) -> Self {
        Self::new(value, AreaUnit::Acre)
    }

    /// 제곱미터로 환산한 값.
    pub fn to_square_meters(&self) -> f64 {
        to_square_meter(self.value, self.unit)
    }
}

impl std::fmt::Display for LandArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// 물 수요 계산 입력. 호출마다 새로 만든다.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub crop_type: String,
    pub soil_type: SoilType,
    pub land_area: LandArea,
    /// 기온 [°C]
    pub temperature_c: f64,
    /// 강우량 [mm], 0 이상
    pub rainfall_mm: f64,
    /// 관개 효율 (0, 1]
    pub irrigation_efficiency: f64,
    /// 관개 방식. 효율 값과 별개로 권장사항 판단에만 쓴다.
    pub irrigation_method: Option<IrrigationMethod>,
    /// 계절. 계절 보정을 쓰지 않으면 None
    pub season: Option<Season>,
}

impl CalculationInput {
    /// 강우 0, 효율 1.0, 계절 없음으로 입력을 만든다.
    pub fn new(
        crop_type: impl Into<String>,
        soil_type: SoilType,
        land_area: LandArea,
        temperature_c: f64,
    ) -> Self {
        Self {
            crop_type: crop_type.into(),
            soil_type,
            land_area,
            temperature_c,
            rainfall_mm: 0.0,
            irrigation_efficiency: 1.0,
            irrigation_method: None,
            season: None,
        }
    }

    pub fn with_rainfall(mut self, rainfall_mm: f64) -> Self {
        self.rainfall_mm = rainfall_mm;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.irrigation_efficiency = efficiency;
        self
    }

    /// 관개 방식을 지정하고 정책 표의 효율을 적용한다.
    pub fn with_method(mut self, method: IrrigationMethod, policy: &EstimatorPolicy) -> Self {
        self.irrigation_method = Some(method);
        self.irrigation_efficiency = policy.efficiency_for(method);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }
}

/// 계산에 실제로 적용된 보정 계수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedFactors {
    pub area_m2: f64,
    pub temperature_factor: f64,
    pub soil_factor: f64,
    pub seasonal_factor: f64,
    pub irrigation_efficiency: f64,
    /// 공제 전 누적값에서 뺀 강우량 (기준 단위, 클램프 전)
    pub rainfall_credit: f64,
    /// 강우 공제 전 물량 [L]
    pub gross_water_liters: f64,
}

/// 물 수요 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    /// 일일 필요 수량 [L], 0 이상
    pub water_volume_liters: f64,
    /// 펌프 전력 소비 [kWh]
    pub power_consumption_kwh: f64,
    /// 전력 비용
    pub cost_estimate: f64,
    pub factors: AppliedFactors,
}

/// 물 수요 계산 시 입력 검증 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// 기준표에 없는 작물
    UnknownCropType(String),
    /// 면적이 0 이하이거나 유한하지 않음
    InvalidArea(f64),
    /// 효율이 (0, 1] 범위 밖
    InvalidEfficiency(f64),
    /// 강우량이 음수이거나 유한하지 않음
    InvalidRainfall(f64),
    /// 기온이 유한하지 않음
    InvalidTemperature(f64),
    /// 정책 상수가 범위를 벗어남
    InvalidPolicy(PolicyError),
}

impl std::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateError::UnknownCropType(c) => write!(f, "알 수 없는 작물: {c}"),
            EstimateError::InvalidArea(v) => write!(f, "면적은 0보다 커야 합니다: {v}"),
            EstimateError::InvalidEfficiency(v) => {
                write!(f, "관개 효율은 (0, 1] 범위여야 합니다: {v}")
            }
            EstimateError::InvalidRainfall(v) => write!(f, "강우량은 0 이상이어야 합니다: {v}"),
            EstimateError::InvalidTemperature(v) => write!(f, "잘못된 기온 값: {v}"),
            EstimateError::InvalidPolicy(e) => write!(f, "계산 정책 오류: {e}"),
        }
    }
}

impl std::error::Error for EstimateError {}

impl From<PolicyError> for EstimateError {
    fn from(value: PolicyError) -> Self {
        EstimateError::InvalidPolicy(value)
    }
}

/// 작물·토양·기상·면적으로 일일 관개 수량과 펌프 전력/비용을 추정한다.
///
/// 순서: 면적 환산 → 기준 수요 × 면적 → 온도 → 토양 → 계절 → 효율 → 강우 공제
/// → 리터 환산 → 전력/비용. 곱셈 보정끼리는 순서에 무관하지만 강우 공제는
/// 반드시 마지막에 적용한다. 정책을 포함한 모든 검증은 계산 전에 끝난다.
pub fn estimate<C: CropCatalog + ?Sized>(
    catalog: &C,
    policy: &EstimatorPolicy,
    input: &CalculationInput,
) -> Result<CalculationResult, EstimateError> {
    policy.validate()?;
    let profile = catalog
        .profile(&input.crop_type)
        .ok_or_else(|| EstimateError::UnknownCropType(input.crop_type.clone()))?;
    let area_m2 = input.land_area.to_square_meters();
    if !(area_m2.is_finite() && area_m2 > 0.0) {
        return Err(EstimateError::InvalidArea(input.land_area.value));
    }
    let efficiency = input.irrigation_efficiency;
    if !(efficiency > 0.0 && efficiency <= 1.0) {
        return Err(EstimateError::InvalidEfficiency(efficiency));
    }
    if !(input.rainfall_mm.is_finite() && input.rainfall_mm >= 0.0) {
        return Err(EstimateError::InvalidRainfall(input.rainfall_mm));
    }
    if !input.temperature_c.is_finite() {
        return Err(EstimateError::InvalidTemperature(input.temperature_c));
    }

    let temperature_factor = temperature_factor(
        input.temperature_c,
        profile.temperature_multiplier,
        policy,
    );
    let soil_factor = profile.soil_factor(input.soil_type);
    let seasonal_factor = profile.seasonal_factor(input.season);

    // 단위 면적당 보정 수요 (기준 단위)
    let per_m2 =
        profile.base_water_need * temperature_factor * soil_factor * seasonal_factor / efficiency;
    let gross = per_m2 * area_m2;
    let rainfall_credit = input.rainfall_mm * policy.rainfall_credit_factor;
    let net = match policy.rainfall_basis {
        RainfallBasis::RunningTotal => (gross - rainfall_credit).max(0.0),
        RainfallBasis::Depth => (per_m2 - rainfall_credit).max(0.0) * area_m2,
    };

    let liters_factor = policy.base_need_unit.liters_factor();
    let water_volume_liters = net * liters_factor;
    let power_consumption_kwh = water_volume_liters * policy.pump_energy_kwh_per_liter;
    let cost_estimate = power_consumption_kwh * policy.electricity_rate;

    let factors = AppliedFactors {
        area_m2,
        temperature_factor,
        soil_factor,
        seasonal_factor,
        irrigation_efficiency: efficiency,
        rainfall_credit,
        gross_water_liters: gross * liters_factor,
    };
    debug!(
        crop = %input.crop_type,
        soil = %input.soil_type,
        area_m2,
        temperature_factor,
        soil_factor,
        seasonal_factor,
        efficiency,
        rainfall_credit,
        water_volume_liters,
        "water requirement estimated"
    );

    Ok(CalculationResult {
        water_volume_liters,
        power_consumption_kwh,
        cost_estimate,
        factors,
    })
}

/// 고온이면 배율, 저온이면 역수, 그 사이면 1.0. 경계값은 보정하지 않는다.
pub fn temperature_factor(temperature_c: f64, multiplier: f64, policy: &EstimatorPolicy) -> f64 {
    if temperature_c > policy.hot_threshold_c {
        multiplier
    } else if temperature_c < policy.cold_threshold_c {
        1.0 / multiplier
    } else {
        1.0
    }
}

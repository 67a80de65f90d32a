//! 작물 물 수요 계산과 관련 보조 계산 모음.
//! 기준표(작물 프로파일), 계산 정책, 수요 추정, 권장사항, 관개 일정,
//! 급수 기록 평가로 구성한다.

pub mod crop_profile;
pub mod irrigation_schedule;
pub mod policy;
pub mod recommendations;
pub mod usage_status;
pub mod water_requirement;

pub use crop_profile::{CropCatalog, CropProfile, CropTable, CropTableError, Season, SoilType};
pub use policy::{
    BaseNeedUnit, EstimatorPolicy, IrrigationEfficiencyTable, IrrigationMethod, PolicyError,
    RainfallBasis,
};
pub use water_requirement::{
    estimate, AppliedFactors, CalculationInput, CalculationResult, EstimateError, LandArea,
};

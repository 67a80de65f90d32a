//! 물 수요 추정 회귀 테스트. 대시보드 기준표의 밀/벼 값을 사용한다.
use approx::assert_relative_eq;
use farm_water_toolbox::units::AreaUnit;
use farm_water_toolbox::water::{
    estimate, BaseNeedUnit, CalculationInput, CropCatalog, CropProfile, CropTable,
    EstimateError, EstimatorPolicy, IrrigationMethod, LandArea, PolicyError, RainfallBasis, Season,
    SoilType,
};

fn wheat_hot(area: LandArea) -> CalculationInput {
    CalculationInput::new("wheat", SoilType::Loamy, area, 35.0)
}

#[test]
fn wheat_hot_day_scales_by_temperature_multiplier() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let res = estimate(&table, &policy, &wheat_hot(LandArea::square_meters(1000.0)))
        .expect("wheat estimate");
    // 2.5 × 1000 × 1.2 × 1.0
    assert_relative_eq!(res.water_volume_liters, 3000.0, max_relative = 1e-12);
    assert_relative_eq!(res.factors.temperature_factor, 1.2);
    assert_relative_eq!(res.factors.soil_factor, 1.0);
    assert_relative_eq!(res.power_consumption_kwh, 3000.0 * 0.00185, max_relative = 1e-12);
    assert_relative_eq!(res.cost_estimate, 3000.0 * 0.00185 * 0.12, max_relative = 1e-12);
}

#[test]
fn rainfall_credit_is_subtracted_last() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let dry = estimate(&table, &policy, &wheat_hot(LandArea::square_meters(1000.0))).unwrap();
    let wet = estimate(
        &table,
        &policy,
        &wheat_hot(LandArea::square_meters(1000.0)).with_rainfall(50.0),
    )
    .unwrap();
    assert!(wet.water_volume_liters < dry.water_volume_liters);
    assert_relative_eq!(
        dry.water_volume_liters - wet.water_volume_liters,
        40.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(wet.factors.rainfall_credit, 40.0, max_relative = 1e-12);
    assert_relative_eq!(wet.factors.gross_water_liters, dry.water_volume_liters);
}

#[test]
fn heavy_rain_clamps_to_zero() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let input = wheat_hot(LandArea::square_meters(10.0)).with_rainfall(500.0);
    let res = estimate(&table, &policy, &input).unwrap();
    assert_eq!(res.water_volume_liters, 0.0);
    assert_eq!(res.power_consumption_kwh, 0.0);
    assert_eq!(res.cost_estimate, 0.0);
}

#[test]
fn cold_day_uses_inverse_multiplier_and_thresholds_are_strict() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let area = LandArea::square_meters(100.0);

    let cold = CalculationInput::new("wheat", SoilType::Loamy, area, 10.0);
    let res = estimate(&table, &policy, &cold).unwrap();
    assert_relative_eq!(res.factors.temperature_factor, 1.0 / 1.2);

    for t in [15.0, 22.0, 30.0] {
        let mild = CalculationInput::new("wheat", SoilType::Loamy, area, t);
        let res = estimate(&table, &policy, &mild).unwrap();
        assert_eq!(res.factors.temperature_factor, 1.0, "t={t}");
    }
}

#[test]
fn hot_threshold_is_configurable() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy {
        hot_threshold_c: 25.0,
        ..EstimatorPolicy::default()
    };
    let input = CalculationInput::new("rice", SoilType::Clay, LandArea::square_meters(1.0), 27.0);
    let res = estimate(&table, &policy, &input).unwrap();
    assert_relative_eq!(res.factors.temperature_factor, 1.3);
    assert_relative_eq!(res.water_volume_liters, 4.0 * 1.3, max_relative = 1e-12);
}

#[test]
fn soil_season_and_method_multiply() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("wheat", SoilType::Sandy, LandArea::square_meters(200.0), 20.0)
        .with_season(Season::Summer)
        .with_method(IrrigationMethod::Drip, &policy);
    let res = estimate(&table, &policy, &input).unwrap();
    let expected = 2.5 * 200.0 * 1.3 * 1.3 / 0.9;
    assert_relative_eq!(res.water_volume_liters, expected, max_relative = 1e-12);
    assert_relative_eq!(res.factors.seasonal_factor, 1.3);
    assert_relative_eq!(res.factors.irrigation_efficiency, 0.9);
}

#[test]
fn missing_soil_or_season_entry_defaults_to_identity() {
    let mut table = CropTable::new();
    table
        .insert("millet", CropProfile::new(3.0, 1.1))
        .expect("valid profile");
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("Millet", SoilType::Silt, LandArea::square_meters(10.0), 20.0)
        .with_season(Season::Monsoon);
    let res = estimate(&table, &policy, &input).unwrap();
    assert_eq!(res.factors.soil_factor, 1.0);
    assert_eq!(res.factors.seasonal_factor, 1.0);
    assert_relative_eq!(res.water_volume_liters, 30.0, max_relative = 1e-12);
}

#[test]
fn hectare_matches_square_meters() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let ha = estimate(&table, &policy, &wheat_hot(LandArea::hectares(1.0))).unwrap();
    let m2 = estimate(&table, &policy, &wheat_hot(LandArea::square_meters(10_000.0))).unwrap();
    assert_eq!(ha.water_volume_liters, m2.water_volume_liters);

    let acre = estimate(&table, &policy, &wheat_hot(LandArea::acres(1.0))).unwrap();
    assert_relative_eq!(acre.factors.area_m2, 4046.86);
    assert_eq!(
        LandArea::new(2.0, AreaUnit::Hectare).to_square_meters(),
        20_000.0
    );
}

#[test]
fn monotone_in_area_rainfall_and_efficiency() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let base = CalculationInput::new("rice", SoilType::Loamy, LandArea::square_meters(50.0), 32.0)
        .with_rainfall(20.0)
        .with_efficiency(0.75);

    let mut prev = 0.0;
    for area in [0.5, 1.0, 10.0, 50.0, 500.0, 5000.0] {
        let mut input = base.clone();
        input.land_area = LandArea::square_meters(area);
        let v = estimate(&table, &policy, &input).unwrap().water_volume_liters;
        assert!(v >= prev, "area {area}: {v} < {prev}");
        assert!(v >= 0.0);
        prev = v;
    }

    let mut prev = f64::INFINITY;
    for rain in [0.0, 1.0, 5.0, 50.0, 100.0, 1000.0] {
        let v = estimate(&table, &policy, &base.clone().with_rainfall(rain))
            .unwrap()
            .water_volume_liters;
        assert!(v <= prev, "rain {rain}: {v} > {prev}");
        assert!(v >= 0.0);
        prev = v;
    }

    let mut prev = 0.0;
    for eff in [1.0, 0.9, 0.75, 0.65, 0.5, 0.1] {
        let v = estimate(&table, &policy, &base.clone().with_efficiency(eff))
            .unwrap()
            .water_volume_liters;
        assert!(v >= prev, "eff {eff}: {v} < {prev}");
        prev = v;
    }
}

#[test]
fn depth_basis_credits_rain_per_square_meter() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy {
        rainfall_basis: RainfallBasis::Depth,
        ..EstimatorPolicy::default()
    };
    let area = LandArea::square_meters(1000.0);
    let light = estimate(&table, &policy, &wheat_hot(area).with_rainfall(2.0)).unwrap();
    // (3.0 - 1.6) × 1000
    assert_relative_eq!(light.water_volume_liters, 1400.0, max_relative = 1e-9);

    let heavy = estimate(&table, &policy, &wheat_hot(area).with_rainfall(50.0)).unwrap();
    assert_eq!(heavy.water_volume_liters, 0.0);
}

#[test]
fn base_need_unit_controls_liter_conversion() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy {
        base_need_unit: BaseNeedUnit::CubicMetersPerHectare,
        ..EstimatorPolicy::default()
    };
    let res = estimate(&table, &policy, &wheat_hot(LandArea::square_meters(1000.0))).unwrap();
    assert_relative_eq!(res.water_volume_liters, 300.0, max_relative = 1e-12);
}

#[test]
fn unknown_crop_is_an_error_not_zero() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("corn", SoilType::Loamy, LandArea::square_meters(1.0), 20.0);
    let err = estimate(&table, &policy, &input).unwrap_err();
    assert_eq!(err, EstimateError::UnknownCropType("corn".to_string()));
}

#[test]
fn invalid_inputs_are_rejected_before_calculation() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let ok = wheat_hot(LandArea::square_meters(100.0));

    let mut zero_area = ok.clone();
    zero_area.land_area = LandArea::square_meters(0.0);
    assert_eq!(
        estimate(&table, &policy, &zero_area).unwrap_err(),
        EstimateError::InvalidArea(0.0)
    );

    let mut negative_area = ok.clone();
    negative_area.land_area = LandArea::hectares(-1.0);
    assert!(matches!(
        estimate(&table, &policy, &negative_area),
        Err(EstimateError::InvalidArea(_))
    ));

    for eff in [0.0, -0.5, 1.01, f64::NAN] {
        let input = ok.clone().with_efficiency(eff);
        assert!(
            matches!(
                estimate(&table, &policy, &input),
                Err(EstimateError::InvalidEfficiency(_))
            ),
            "eff={eff}"
        );
    }

    assert_eq!(
        estimate(&table, &policy, &ok.clone().with_rainfall(-1.0)).unwrap_err(),
        EstimateError::InvalidRainfall(-1.0)
    );

    let mut nan_temp = ok.clone();
    nan_temp.temperature_c = f64::NAN;
    assert!(matches!(
        estimate(&table, &policy, &nan_temp),
        Err(EstimateError::InvalidTemperature(_))
    ));
}

#[test]
fn policy_built_in_code_is_validated_before_calculation() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy {
        rainfall_credit_factor: -0.8,
        electricity_rate: -1.0,
        ..EstimatorPolicy::default()
    };
    let input = wheat_hot(LandArea::square_meters(1000.0)).with_rainfall(50.0);
    assert_eq!(
        estimate(&table, &policy, &input).unwrap_err(),
        EstimateError::InvalidPolicy(PolicyError::InvalidConstant("rainfall_credit_factor"))
    );

    let negative_rate = EstimatorPolicy {
        electricity_rate: -1.0,
        ..EstimatorPolicy::default()
    };
    assert!(matches!(
        estimate(&table, &negative_rate, &input),
        Err(EstimateError::InvalidPolicy(PolicyError::InvalidConstant("electricity_rate")))
    ));

    let inverted = EstimatorPolicy {
        hot_threshold_c: 10.0,
        cold_threshold_c: 20.0,
        ..EstimatorPolicy::default()
    };
    assert!(matches!(
        estimate(&table, &inverted, &input),
        Err(EstimateError::InvalidPolicy(PolicyError::ThresholdOrder { .. }))
    ));
}

struct FixtureCatalog(CropProfile);

impl CropCatalog for FixtureCatalog {
    fn profile(&self, crop: &str) -> Option<&CropProfile> {
        (crop == "fixture").then_some(&self.0)
    }
}

#[test]
fn estimator_accepts_injected_catalog() {
    let catalog = FixtureCatalog(CropProfile::new(1.0, 2.0).with_soil_factor(SoilType::Clay, 0.5));
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("fixture", SoilType::Clay, LandArea::square_meters(10.0), 40.0);
    let res = estimate(&catalog, &policy, &input).unwrap();
    assert_relative_eq!(res.water_volume_liters, 10.0, max_relative = 1e-12);
}

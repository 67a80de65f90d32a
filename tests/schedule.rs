use farm_water_toolbox::water::irrigation_schedule::{
    default_slots, plan_schedule, pump_run_minutes, ScheduleError, SlotTime,
};
use farm_water_toolbox::water::recommendations::{
    recommend, Recommendation, RecommendationThresholds,
};
use farm_water_toolbox::water::{
    estimate, CalculationInput, CropCatalog, CropTable, EstimatorPolicy, IrrigationMethod,
    LandArea, Season, SoilType,
};

#[test]
fn run_minutes_round_up() {
    // 3000 L / (0.5 L/s × 60) = 100 분
    assert_eq!(pump_run_minutes(3000.0, 0.5), Ok(100));
    assert_eq!(pump_run_minutes(3001.0, 0.5), Ok(101));
    assert_eq!(pump_run_minutes(0.0, 2.0), Ok(0));
    assert_eq!(
        pump_run_minutes(100.0, 0.0),
        Err(ScheduleError::InvalidPumpFlow(0.0))
    );
}

#[test]
fn slot_time_parses_hh_mm() {
    assert_eq!("06:00".parse::<SlotTime>(), SlotTime::new(6, 0));
    assert_eq!("17:30".parse::<SlotTime>().unwrap().to_string(), "17:30");
    assert!(matches!(
        "24:00".parse::<SlotTime>(),
        Err(ScheduleError::InvalidTime(_))
    ));
    assert!(matches!(
        "six".parse::<SlotTime>(),
        Err(ScheduleError::InvalidTime(_))
    ));
}

#[test]
fn schedule_splits_minutes_across_slots() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let area = LandArea::square_meters(1000.0);
    let input = CalculationInput::new("wheat", SoilType::Loamy, area, 35.0);
    let result = estimate(&table, &policy, &input).unwrap();

    // 3000 L at 0.4 L/s -> 125 분
    let entry = plan_schedule("Wheat", area, &result, 0.4, &default_slots()).unwrap();
    assert_eq!(entry.crop, "wheat");
    assert_eq!(entry.duration_minutes, 125);
    assert_eq!(entry.slots.len(), 2);
    assert_eq!(entry.slots[0].start.to_string(), "06:00");
    assert_eq!(entry.slots[0].minutes, 63);
    assert_eq!(entry.slots[1].start.to_string(), "17:00");
    assert_eq!(entry.slots[1].minutes, 62);

    assert_eq!(
        plan_schedule("wheat", area, &result, 0.4, &[]),
        Err(ScheduleError::NoSlots)
    );
}

#[test]
fn recommendations_follow_inputs() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("wheat", SoilType::Sandy, LandArea::hectares(1.0), 35.0)
        .with_method(IrrigationMethod::Flood, &policy)
        .with_season(Season::Summer)
        .with_rainfall(5.0);
    let result = estimate(&table, &policy, &input).unwrap();
    let profile = table.profile("wheat").unwrap();
    let recs = recommend(profile, &input, &result, &RecommendationThresholds::default());
    assert_eq!(
        recs,
        vec![
            Recommendation::SwitchSoil {
                recommended: SoilType::Loamy
            },
            Recommendation::SwitchToDrip,
            Recommendation::IrrigateOffPeak,
            Recommendation::ReduceForRain,
        ]
    );
}

#[test]
fn no_recommendations_for_matching_setup() {
    let table = CropTable::builtin();
    let policy = EstimatorPolicy::default();
    let input = CalculationInput::new("rice", SoilType::Clay, LandArea::square_meters(100.0), 20.0)
        .with_method(IrrigationMethod::Drip, &policy)
        .with_season(Season::Winter);
    let result = estimate(&table, &policy, &input).unwrap();
    let profile = table.profile("rice").unwrap();
    let recs = recommend(profile, &input, &result, &RecommendationThresholds::default());
    assert!(recs.is_empty(), "{recs:?}");
}

use farm_water_toolbox::water::irrigation_schedule::{format_duration, run_duration_minutes, SlotTime};
use farm_water_toolbox::water::usage_status::{
    classify_usage, evaluate_usage, UsageBand, UsageError, UsageLogInput, UsagePolicy,
    UsagePolicyError, UsageStatus,
};

fn t(s: &str) -> SlotTime {
    s.parse().expect("HH:MM")
}

#[test]
fn wheat_bands_classify_under_optimal_over() {
    let policy = UsagePolicy::default();
    assert_eq!(classify_usage(&policy, "wheat", 3999.0), UsageStatus::Underused);
    assert_eq!(classify_usage(&policy, "Wheat", 4000.0), UsageStatus::Optimal);
    assert_eq!(classify_usage(&policy, "WHEAT", 6000.0), UsageStatus::Optimal);
    assert_eq!(classify_usage(&policy, "wheat", 6000.5), UsageStatus::Overused);
    assert_eq!(classify_usage(&policy, " rice ", 8000.0), UsageStatus::Optimal);
    assert_eq!(classify_usage(&policy, "tomato", 6000.0), UsageStatus::Overused);
}

#[test]
fn crop_without_band_is_optimal() {
    let policy = UsagePolicy::default();
    assert_eq!(classify_usage(&policy, "millet", 1.0), UsageStatus::Optimal);
}

#[test]
fn duration_wraps_past_midnight() {
    assert_eq!(run_duration_minutes(t("06:00"), t("08:15")), 135);
    assert_eq!(run_duration_minutes(t("22:30"), t("01:00")), 150);
    assert_eq!(run_duration_minutes(t("07:00"), t("07:00")), 0);
    assert_eq!(format_duration(135), "2h 15m");
    assert_eq!(format_duration(45), "0h 45m");
}

#[test]
fn usage_log_reports_status_duration_and_cost() {
    let policy = UsagePolicy::default();
    let input = UsageLogInput {
        crop_type: "Rice".to_string(),
        water_used_liters: 4500.0,
        start: t("06:00"),
        end: t("08:15"),
    };
    let res = evaluate_usage(&policy, &input).expect("valid log");
    assert_eq!(res.status, UsageStatus::Underused);
    assert_eq!(res.duration_minutes, 135);
    assert!((res.cost - 270.0).abs() < 1e-9, "cost {}", res.cost);
}

#[test]
fn usage_log_rejects_non_positive_volume() {
    let policy = UsagePolicy::default();
    for liters in [0.0, -10.0, f64::NAN] {
        let input = UsageLogInput {
            crop_type: "wheat".to_string(),
            water_used_liters: liters,
            start: t("06:00"),
            end: t("07:00"),
        };
        assert!(
            matches!(evaluate_usage(&policy, &input), Err(UsageError::InvalidVolume(_))),
            "liters={liters}"
        );
    }
}

#[test]
fn usage_policy_validation() {
    assert_eq!(UsagePolicy::default().validate(), Ok(()));

    let mut inverted = UsagePolicy::default();
    inverted
        .bands
        .insert("corn".to_string(), UsageBand::new(5000.0, 3000.0));
    assert!(matches!(
        inverted.validate(),
        Err(UsagePolicyError::InvalidBand { ref crop, .. }) if crop == "corn"
    ));

    let negative_price = UsagePolicy {
        water_price_per_liter: -0.01,
        ..UsagePolicy::default()
    };
    assert_eq!(
        negative_price.validate(),
        Err(UsagePolicyError::InvalidPrice(-0.01))
    );
}

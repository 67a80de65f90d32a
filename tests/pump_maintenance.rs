use chrono::NaiveDate;
use farm_water_toolbox::pump::maintenance::{
    next_maintenance, pump_alerts, AlertKind, AlertLevel, MaintenanceError, PumpAlertThresholds,
    PumpSnapshot,
};
use farm_water_toolbox::pump::pump_control::{
    apply_control, can_apply, complete_maintenance, ControlAction, ControlError, PumpStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn snapshot(status: PumpStatus, temperature_c: f64, efficiency: f64, due: NaiveDate) -> PumpSnapshot {
    PumpSnapshot {
        name: "Pump-A01".to_string(),
        status,
        temperature_c,
        efficiency_percent: efficiency,
        next_maintenance: due,
    }
}

#[test]
fn start_only_from_idle_and_stop_only_from_running() {
    assert_eq!(
        apply_control(PumpStatus::Idle, ControlAction::Start),
        Ok(PumpStatus::Running)
    );
    assert_eq!(
        apply_control(PumpStatus::Running, ControlAction::Stop),
        Ok(PumpStatus::Idle)
    );
    for from in [PumpStatus::Running, PumpStatus::Maintenance, PumpStatus::Error] {
        assert_eq!(
            apply_control(from, ControlAction::Start),
            Err(ControlError::InvalidTransition {
                action: ControlAction::Start,
                from
            })
        );
    }
    for from in [PumpStatus::Idle, PumpStatus::Maintenance, PumpStatus::Error] {
        assert!(!can_apply(from, ControlAction::Stop), "stop from {from}");
    }
}

#[test]
fn maintenance_allowed_from_any_state_but_maintenance() {
    for from in [PumpStatus::Idle, PumpStatus::Running, PumpStatus::Error] {
        assert_eq!(
            apply_control(from, ControlAction::Maintenance),
            Ok(PumpStatus::Maintenance)
        );
    }
    assert!(apply_control(PumpStatus::Maintenance, ControlAction::Maintenance).is_err());

    assert_eq!(complete_maintenance(PumpStatus::Maintenance), Ok(PumpStatus::Idle));
    assert_eq!(
        complete_maintenance(PumpStatus::Running),
        Err(ControlError::NotInMaintenance(PumpStatus::Running))
    );
}

#[test]
fn status_and_action_parse_case_insensitively() {
    assert_eq!(" Running ".parse::<PumpStatus>(), Ok(PumpStatus::Running));
    assert_eq!("STOP".parse::<ControlAction>(), Ok(ControlAction::Stop));
    assert!("reboot".parse::<ControlAction>().is_err());
}

#[test]
fn next_maintenance_adds_interval_days() {
    assert_eq!(next_maintenance(date(2024, 1, 15), 90), Ok(date(2024, 4, 14)));
    assert_eq!(next_maintenance(date(2023, 12, 31), 1), Ok(date(2024, 1, 1)));
    assert_eq!(
        next_maintenance(date(2024, 1, 15), 0),
        Err(MaintenanceError::ZeroInterval)
    );
    assert_eq!(
        next_maintenance(NaiveDate::MAX, 1),
        Err(MaintenanceError::DateOutOfRange)
    );
}

#[test]
fn healthy_running_pump_has_no_alerts() {
    let today = date(2024, 6, 1);
    let pump = snapshot(PumpStatus::Running, 45.0, 92.0, date(2024, 7, 1));
    assert!(pump_alerts(&pump, today, &PumpAlertThresholds::default()).is_empty());
}

#[test]
fn faulted_hot_pump_near_maintenance_raises_each_alert() {
    let today = date(2024, 6, 1);
    let pump = snapshot(PumpStatus::Error, 68.0, 0.0, date(2024, 6, 4));
    let alerts = pump_alerts(&pump, today, &PumpAlertThresholds::default());
    let kinds: Vec<&AlertKind> = alerts.iter().map(|a| &a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &AlertKind::Fault,
            &AlertKind::HighTemperature { temperature_c: 68.0 },
            &AlertKind::MaintenanceDue {
                due: date(2024, 6, 4),
                days_left: 3
            },
        ]
    );
    assert_eq!(alerts[0].level(), AlertLevel::Error);
    assert_eq!(alerts[1].level(), AlertLevel::Warning);
    assert!(alerts.iter().all(|a| a.pump == "Pump-A01"));
}

#[test]
fn alert_thresholds_are_strict() {
    let today = date(2024, 6, 1);
    let thresholds = PumpAlertThresholds::default();
    // 60°C, 정확히 7일 남음, 효율 85%는 경보 없음
    let edge = snapshot(PumpStatus::Running, 60.0, 85.0, date(2024, 6, 8));
    assert!(pump_alerts(&edge, today, &thresholds).is_empty());

    let low = snapshot(PumpStatus::Running, 40.0, 84.5, date(2024, 8, 1));
    let alerts = pump_alerts(&low, today, &thresholds);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].level(), AlertLevel::Info);
}

#[test]
fn low_efficiency_only_counts_while_running() {
    let today = date(2024, 6, 1);
    let idle = snapshot(PumpStatus::Idle, 28.0, 0.0, date(2024, 8, 1));
    assert!(pump_alerts(&idle, today, &PumpAlertThresholds::default()).is_empty());
}

#[test]
fn overdue_maintenance_is_reported_unless_in_maintenance() {
    let today = date(2024, 6, 1);
    let overdue = snapshot(PumpStatus::Idle, 30.0, 0.0, date(2024, 5, 20));
    let alerts = pump_alerts(&overdue, today, &PumpAlertThresholds::default());
    assert!(matches!(
        alerts.as_slice(),
        [a] if a.kind == AlertKind::MaintenanceDue { due: date(2024, 5, 20), days_left: -12 }
    ));

    let servicing = snapshot(PumpStatus::Maintenance, 30.0, 0.0, date(2024, 5, 20));
    assert!(pump_alerts(&servicing, today, &PumpAlertThresholds::default()).is_empty());
}

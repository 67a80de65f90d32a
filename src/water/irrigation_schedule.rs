use std::str::FromStr;

use crate::water::water_requirement::{CalculationResult, LandArea};

/// 일정 계산 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// 펌프 유량이 0 이하
    InvalidPumpFlow(f64),
    /// 잘못된 시각 문자열
    InvalidTime(String),
    /// 가동 시각이 하나도 없음
    NoSlots,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidPumpFlow(v) => write!(f, "펌프 유량은 0보다 커야 합니다: {v}"),
            ScheduleError::InvalidTime(s) => write!(f, "시각 형식(HH:MM) 오류: {s}"),
            ScheduleError::NoSlots => write!(f, "가동 시각이 지정되지 않았습니다"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// 하루 중 시각(HH:MM).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotTime {
    pub hour: u8,
    pub minute: u8,
}

impl SlotTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }
}

impl FromStr for SlotTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// 기본 가동 시각: 06:00, 17:00.
pub fn default_slots() -> Vec<SlotTime> {
    vec![
        SlotTime { hour: 6, minute: 0 },
        SlotTime {
            hour: 17,
            minute: 0,
        },
    ]
}

/// 한 번의 펌프 가동.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSlot {
    pub start: SlotTime,
    pub minutes: u32,
}

/// 관개 일정 항목.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub crop: String,
    pub area: LandArea,
    pub water_per_day_liters: f64,
    /// 하루 총 가동 시간 [분]
    pub duration_minutes: u32,
    pub slots: Vec<RunSlot>,
}

/// 일일 수량을 펌프 유량 [L/s]으로 공급하는 데 필요한 가동 시간 [분]. 올림한다.
pub fn pump_run_minutes(water_liters: f64, pump_flow_l_per_s: f64) -> Result<u32, ScheduleError> {
    if !(pump_flow_l_per_s.is_finite() && pump_flow_l_per_s > 0.0) {
        return Err(ScheduleError::InvalidPumpFlow(pump_flow_l_per_s));
    }
    let minutes = (water_liters.max(0.0) / (pump_flow_l_per_s * 60.0)).ceil();
    Ok(minutes.min(u32::MAX as f64) as u32)
}

/// 계산 결과로 일정 항목을 만든다. 총 가동 시간은 시각별로 고르게 나누고
/// 나머지 분은 앞 시각부터 1분씩 더한다.
pub fn plan_schedule(
    crop: &str,
    area: LandArea,
    result: &CalculationResult,
    pump_flow_l_per_s: f64,
    slots: &[SlotTime],
) -> Result<ScheduleEntry, ScheduleError> {
    if slots.is_empty() {
        return Err(ScheduleError::NoSlots);
    }
    let duration_minutes = pump_run_minutes(result.water_volume_liters, pump_flow_l_per_s)?;
    let n = slots.len() as u32;
    let base = duration_minutes / n;
    let remainder = duration_minutes % n;
    let mut sorted = slots.to_vec();
    sorted.sort();
    let runs = sorted
        .into_iter()
        .enumerate()
        .map(|(i, start)| RunSlot {
            start,
            minutes: base + u32::from((i as u32) < remainder),
        })
        .collect();
    Ok(ScheduleEntry {
        crop: crop.trim().to_lowercase(),
        area,
        water_per_day_liters: result.water_volume_liters,
        duration_minutes,
        slots: runs,
    })
}

/// 시작~종료 시각 사이의 가동 시간 [분]. 종료가 시작보다 이르면 자정을 넘긴 것으로 본다.
pub fn run_duration_minutes(start: SlotTime, end: SlotTime) -> u32 {
    const DAY: u32 = 24 * 60;
    let minute_of_day = |t: SlotTime| u32::from(t.hour) * 60 + u32::from(t.minute);
    (minute_of_day(end) + DAY - minute_of_day(start)) % DAY
}

/// 분 단위 시간을 "2h 15m" 형태로 표기한다.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

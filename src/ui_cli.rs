use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::pump::flow_anomaly::{detect_flow_anomalies, FlowReading};
use crate::pump::maintenance::{next_maintenance, pump_alerts, PumpSnapshot};
use crate::pump::pump_control::{apply_control, complete_maintenance, ControlAction, PumpStatus};
use crate::pump::pump_usage::{pump_usage, PumpRating, PumpUsageInput};
use crate::quantity::QuantityKind;
use crate::units::{convert_volume, to_celsius, AreaUnit, TemperatureUnit, VolumeUnit};
use crate::water::irrigation_schedule::{format_duration, plan_schedule, SlotTime};
use crate::water::recommendations::recommend;
use crate::water::usage_status::{evaluate_usage, UsageLogInput};
use crate::water::{
    estimate, CalculationInput, CalculationResult, CropCatalog, CropTable, IrrigationMethod,
    LandArea, RainfallBasis, Season, SoilType,
};

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "farm_water_toolbox", version, about = "작물 관개 수량·펌프 전력 계산 도구")]
pub struct Cli {
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// 없으면 대화형 메뉴를 실행한다.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 일일 관개 수량과 전력/비용 추정
    Estimate(EstimateArgs),
    /// 작물 기준표 출력
    Crops,
    /// 단위 변환 (temperature | area | volume)
    Convert {
        kind: QuantityKind,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// 펌프 운전 시간 기반 전력량/요금
    PumpUsage {
        /// 정격 (0.5hp, 1hp, 2hp, 3hp, 5hp)
        #[arg(long, default_value = "2hp")]
        rating: PumpRating,
        /// 정격 대신 쓸 전력 [kW]
        #[arg(long)]
        power_kw: Option<f64>,
        /// 운전 시간 [h]
        #[arg(long)]
        hours: f64,
        /// 전기 요금 [통화/kWh]. 없으면 정책 값
        #[arg(long)]
        rate: Option<f64>,
    },
    /// 유량 측정값으로 누수/막힘 점검 [L/min]
    FlowCheck {
        #[arg(required = true, num_args = 1..)]
        readings: Vec<f64>,
    },
    /// 펌프 제어 명령의 허용 여부와 전환 후 상태
    PumpControl {
        /// 현재 상태 (running, idle, maintenance, error)
        #[arg(long)]
        status: PumpStatus,
        /// 명령 (start, stop, maintenance). 없으면 점검 완료 처리
        #[arg(long)]
        action: Option<ControlAction>,
    },
    /// 펌프 점검 일정과 경보 확인
    PumpAlerts(PumpAlertArgs),
    /// 급수 기록 평가 (적정 범위, 가동 시간, 물 비용)
    UsageCheck {
        #[arg(long)]
        crop: String,
        /// 사용한 물 [L]
        #[arg(long)]
        liters: f64,
        /// 시작 시각 (HH:MM)
        #[arg(long)]
        start: SlotTime,
        /// 종료 시각 (HH:MM), 자정을 넘길 수 있음
        #[arg(long)]
        end: SlotTime,
    },
    /// 현재 설정 출력
    Settings,
}

#[derive(Debug, Args)]
pub struct PumpAlertArgs {
    #[arg(long, default_value = "pump")]
    pub name: String,
    /// 현재 상태 (running, idle, maintenance, error)
    #[arg(long, default_value = "idle")]
    pub status: PumpStatus,
    /// 본체 온도 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    /// 운전 효율 [%]
    #[arg(long, default_value_t = 0.0)]
    pub efficiency: f64,
    /// 마지막 점검일 (YYYY-MM-DD)
    #[arg(long)]
    pub last_maintenance: NaiveDate,
    /// 점검 주기 [일]
    #[arg(long, default_value_t = 90)]
    pub interval: u32,
    /// 기준일 (YYYY-MM-DD). 없으면 오늘
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// 작물 (예: wheat, rice)
    #[arg(long)]
    pub crop: String,
    /// 토양 (loamy, sandy, clay, silt)
    #[arg(long, default_value = "loamy")]
    pub soil: SoilType,
    /// 경작 면적 값
    #[arg(long)]
    pub area: f64,
    /// 면적 단위 (m2, ha, acre, ft2). 없으면 설정 기본값
    #[arg(long)]
    pub area_unit: Option<String>,
    /// 기온 값
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    /// 기온 단위 (C, F, K). 없으면 설정 기본값
    #[arg(long)]
    pub temperature_unit: Option<String>,
    /// 강우량 [mm]
    #[arg(long, default_value_t = 0.0)]
    pub rainfall: f64,
    /// 관개 방식 (drip, sprinkler, flood, furrow)
    #[arg(long, conflicts_with = "efficiency")]
    pub method: Option<IrrigationMethod>,
    /// 관개 효율 (0, 1]
    #[arg(long)]
    pub efficiency: Option<f64>,
    /// 계절 (summer, winter, monsoon)
    #[arg(long)]
    pub season: Option<Season>,
    /// 펌프 유량 [L/s]. 주어지면 관개 일정을 계획한다.
    #[arg(long)]
    pub pump_flow: Option<f64>,
    /// 결과 체적 단위 (L, m3, gal)
    #[arg(long)]
    pub volume_unit: Option<String>,
}

/// 추정 명령에 필요한 값을 모은 요청.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub input: CalculationInput,
    pub pump_flow_l_per_s: Option<f64>,
    pub volume_unit: VolumeUnit,
}

impl EstimateArgs {
    /// 설정 기본 단위를 반영해 계산 입력으로 바꾼다.
    pub fn into_request(self, cfg: &Config) -> Result<EstimateRequest, AppError> {
        let area_unit = match &self.area_unit {
            Some(s) => conversion::parse_area_unit(s)?,
            None => cfg.default_units.area,
        };
        let temperature_unit = match &self.temperature_unit {
            Some(s) => conversion::parse_temperature_unit(s)?,
            None => cfg.default_units.temperature,
        };
        let volume_unit = match &self.volume_unit {
            Some(s) => conversion::parse_volume_unit(s)?,
            None => cfg.default_units.volume,
        };
        let mut input = CalculationInput::new(
            self.crop,
            self.soil,
            LandArea::new(self.area, area_unit),
            to_celsius(self.temperature, temperature_unit),
        )
        .with_rainfall(self.rainfall);
        if let Some(method) = self.method {
            input = input.with_method(method, &cfg.policy);
        }
        if let Some(eff) = self.efficiency {
            input = input.with_efficiency(eff);
        }
        if let Some(season) = self.season {
            input = input.with_season(season);
        }
        Ok(EstimateRequest {
            input,
            pump_flow_l_per_s: self.pump_flow.or(cfg.schedule.pump_flow_l_per_s),
            volume_unit,
        })
    }
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    CropList,
    UnitConversion,
    PumpUsage,
    UsageCheck,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Farm Water Toolbox ===");
    println!("1) 물 수요 계산");
    println!("2) 작물 기준표");
    println!("3) 단위 변환기");
    println!("4) 펌프 전력 사용량");
    println!("5) 급수 기록 평가");
    println!("6) 설정");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::CropList),
            "3" => return Ok(MenuChoice::UnitConversion),
            "4" => return Ok(MenuChoice::PumpUsage),
            "5" => return Ok(MenuChoice::UsageCheck),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 대화형 물 수요 계산 메뉴.
pub fn prompt_estimate(cfg: &Config, table: &CropTable) -> Result<(), AppError> {
    println!("\n-- 물 수요 계산 --");
    let names: Vec<&str> = table.crops().map(|(name, _)| name).collect();
    println!("작물: {}", names.join(", "));
    let crop = read_line("작물 입력: ")?;
    let soil = read_choice("토양 (loamy/sandy/clay/silt): ", SoilType::Loamy)?;
    let area = read_f64("면적 값: ")?;
    let area_unit = read_area_unit(cfg.default_units.area)?;
    let temp = read_f64("기온 값: ")?;
    let temp_unit = read_temperature_unit(cfg.default_units.temperature)?;
    let rainfall = read_f64("강우량 [mm]: ")?;
    let method = read_choice("관개 방식 (drip/sprinkler/flood/furrow): ", IrrigationMethod::Drip)?;
    let season_line = read_line("계절 (summer/winter/monsoon, 없으면 엔터): ")?;
    let season = season_line.trim().parse::<Season>().ok();

    let mut input = CalculationInput::new(
        crop.trim(),
        soil,
        LandArea::new(area, area_unit),
        to_celsius(temp, temp_unit),
    )
    .with_rainfall(rainfall)
    .with_method(method, &cfg.policy);
    if let Some(season) = season {
        input = input.with_season(season);
    }
    let request = EstimateRequest {
        input,
        pump_flow_l_per_s: cfg.schedule.pump_flow_l_per_s,
        volume_unit: cfg.default_units.volume,
    };
    run_estimate(cfg, table, &request)
}

/// 계산을 수행하고 결과·권장사항·일정을 출력한다.
pub fn run_estimate(
    cfg: &Config,
    table: &CropTable,
    request: &EstimateRequest,
) -> Result<(), AppError> {
    let input = &request.input;
    let result = estimate(table, &cfg.policy, input)?;
    print_result(&result, request.volume_unit);

    if let Some(profile) = table.profile(&input.crop_type) {
        let recs = recommend(profile, input, &result, &cfg.recommendation);
        if !recs.is_empty() {
            println!("권장사항:");
            for rec in recs {
                println!("  - {rec}");
            }
        }
    }

    if let Some(flow) = request.pump_flow_l_per_s {
        let slots = cfg.schedule.parsed_slots()?;
        let entry = plan_schedule(&input.crop_type, input.land_area, &result, flow, &slots)?;
        println!(
            "관개 일정: {} ({}) 하루 {} 분",
            entry.crop, entry.area, entry.duration_minutes
        );
        for slot in &entry.slots {
            println!("  {} 부터 {} 분", slot.start, slot.minutes);
        }
    }
    Ok(())
}

fn print_result(result: &CalculationResult, volume_unit: VolumeUnit) {
    let volume = convert_volume(result.water_volume_liters, VolumeUnit::Liter, volume_unit);
    let f = &result.factors;
    println!("일일 필요 수량: {:.1} {}/day", volume, volume_unit.symbol());
    println!("펌프 전력: {:.2} kWh/day", result.power_consumption_kwh);
    println!("운전 비용: {:.2} /day", result.cost_estimate);
    println!(
        "적용 계수: 면적 {:.1} m², 온도 {:.3}, 토양 {:.2}, 계절 {:.2}, 효율 {:.2}, 강우 공제 {:.1}",
        f.area_m2,
        f.temperature_factor,
        f.soil_factor,
        f.seasonal_factor,
        f.irrigation_efficiency,
        f.rainfall_credit
    );
}

/// 작물 기준표를 출력한다.
pub fn print_crops(table: &CropTable) {
    println!("\n-- 작물 기준표 --");
    for (name, p) in table.crops() {
        let soils: Vec<String> = p
            .soil_factors
            .iter()
            .map(|(s, v)| format!("{s}={v}"))
            .collect();
        let seasons: Vec<String> = p
            .seasonal_adjustment
            .iter()
            .map(|(s, v)| format!("{s}={v}"))
            .collect();
        println!(
            "{name}: 기준 {} / 온도배율 {} / 토양 [{}] / 계절 [{}] / 권장 토양 {}",
            p.base_water_need,
            p.temperature_multiplier,
            soils.join(", "),
            seasons.join(", "),
            p.recommended_soil.map(|s| s.as_str()).unwrap_or("-")
        );
    }
}

/// 단위 변환 결과를 출력한다.
pub fn handle_unit_conversion(
    kind: QuantityKind,
    value: f64,
    from: &str,
    to: &str,
) -> Result<(), AppError> {
    let result = conversion::convert(kind, value, from.trim(), to.trim())?;
    println!("변환 결과: {result} {}", to.trim());
    Ok(())
}

/// 대화형 단위 변환 메뉴.
pub fn prompt_unit_conversion() -> Result<(), AppError> {
    println!("\n-- 단위 변환 --");
    println!("1) 온도  2) 면적  3) 체적");
    let kind = loop {
        let sel = read_line("항목 번호를 입력: ")?;
        match sel.trim() {
            "1" => break QuantityKind::Temperature,
            "2" => break QuantityKind::Area,
            "3" => break QuantityKind::Volume,
            _ => println!("지원하지 않는 번호입니다."),
        }
    };
    let value = read_f64("값 입력: ")?;
    let from_unit = read_line("입력 단위(ex: C, ha, L): ")?;
    let to_unit = read_line("변환 단위(ex: F, m2, m3): ")?;
    handle_unit_conversion(kind, value, &from_unit, &to_unit)
}

/// 펌프 전력 사용량을 계산해 출력한다.
pub fn handle_pump_usage(power_kw: f64, hours: f64, rate: f64) {
    let result = pump_usage(PumpUsageInput {
        power_kw,
        running_hours: hours,
        electricity_rate: rate,
    });
    println!(
        "전력량: {:.2} kWh, 요금: {:.2}",
        result.energy_kwh, result.cost
    );
    for w in &result.warnings {
        println!("주의: {w}");
    }
}

/// 대화형 펌프 전력 메뉴.
pub fn prompt_pump_usage(cfg: &Config) -> Result<(), AppError> {
    println!("\n-- 펌프 전력 사용량 --");
    let labels: Vec<&str> = PumpRating::ALL.iter().map(|r| r.label()).collect();
    let rating = read_choice(
        &format!("정격 ({}): ", labels.join("/")),
        PumpRating::default(),
    )?;
    let hours = read_f64("운전 시간 [h]: ")?;
    handle_pump_usage(rating.power_kw(), hours, cfg.policy.electricity_rate);
    Ok(())
}

/// 유량 측정값을 점검해 출력한다.
pub fn handle_flow_check(cfg: &Config, values: &[f64]) {
    let readings: Vec<FlowReading> = values
        .iter()
        .enumerate()
        .map(|(i, v)| FlowReading {
            at: format!("#{}", i + 1),
            flow_rate: *v,
        })
        .collect();
    let report = detect_flow_anomalies(&readings, &cfg.flow_anomaly);
    println!("평균 유량: {:.2} L/min", report.mean_flow);
    if !report.has_leakage() {
        println!("이상 없음");
        return;
    }
    for (anomaly, advice) in report.anomalies.iter().zip(report.recommendations()) {
        println!(
            "{} {:.2} L/min ({:?}): {advice}",
            anomaly.at, anomaly.flow_rate, anomaly.kind
        );
    }
}

/// 제어 명령을 적용한 결과를 출력한다. 명령이 없으면 점검 완료로 처리한다.
pub fn handle_pump_control(
    status: PumpStatus,
    action: Option<ControlAction>,
) -> Result<(), AppError> {
    let next = match action {
        Some(action) => apply_control(status, action)?,
        None => complete_maintenance(status)?,
    };
    println!("상태 전환: {status} -> {next}");
    Ok(())
}

/// 다음 점검일과 경보를 출력한다.
pub fn handle_pump_alerts(cfg: &Config, args: &PumpAlertArgs) -> Result<(), AppError> {
    let due = next_maintenance(args.last_maintenance, args.interval)?;
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let snapshot = PumpSnapshot {
        name: args.name.clone(),
        status: args.status,
        temperature_c: args.temperature,
        efficiency_percent: args.efficiency,
        next_maintenance: due,
    };
    println!("다음 점검일: {}", due.format("%Y-%m-%d"));
    let alerts = pump_alerts(&snapshot, today, &cfg.pump_alert);
    if alerts.is_empty() {
        println!("경보 없음");
    }
    for alert in &alerts {
        println!("[{:?}] {alert}", alert.level());
    }
    Ok(())
}

/// 급수 기록을 평가해 출력한다.
pub fn handle_usage_check(
    cfg: &Config,
    crop: &str,
    liters: f64,
    start: SlotTime,
    end: SlotTime,
) -> Result<(), AppError> {
    let input = UsageLogInput {
        crop_type: crop.trim().to_string(),
        water_used_liters: liters,
        start,
        end,
    };
    let result = evaluate_usage(&cfg.usage, &input)?;
    println!(
        "{}: {:.1} L, {} ({start}~{end}), 상태 {}, 물 비용 {:.2}",
        input.crop_type,
        liters,
        format_duration(result.duration_minutes),
        result.status,
        result.cost
    );
    Ok(())
}

/// 대화형 급수 기록 평가 메뉴.
pub fn prompt_usage_check(cfg: &Config) -> Result<(), AppError> {
    println!("\n-- 급수 기록 평가 --");
    let crop = read_line("작물 입력: ")?;
    let liters = read_f64("사용량 [L]: ")?;
    let start = read_slot_time("시작 시각 (HH:MM): ")?;
    let end = read_slot_time("종료 시각 (HH:MM): ")?;
    handle_usage_check(cfg, &crop, liters, start, end)
}

/// 현재 설정을 출력한다.
pub fn print_settings(cfg: &Config) {
    let p = &cfg.policy;
    println!("\n-- 설정 --");
    println!(
        "고온 기준 {}°C, 저온 기준 {}°C, 강우 공제 {} ({:?})",
        p.hot_threshold_c, p.cold_threshold_c, p.rainfall_credit_factor, p.rainfall_basis
    );
    println!(
        "기준 단위 {:?}, 펌프 원단위 {} kWh/L, 전기 요금 {}",
        p.base_need_unit, p.pump_energy_kwh_per_liter, p.electricity_rate
    );
    for method in IrrigationMethod::ALL {
        println!("  {method} 효율 {}", p.efficiency_for(method));
    }
}

/// 설정 메뉴를 처리한다. 변경된 값은 호출자가 저장한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    print_settings(cfg);
    println!("1) 고온 기준  2) 저온 기준  3) 강우 공제 방식");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    let mut next = cfg.policy.clone();
    match sel.trim() {
        "" => return Ok(()),
        "1" => next.hot_threshold_c = read_f64("고온 기준 [°C]: ")?,
        "2" => next.cold_threshold_c = read_f64("저온 기준 [°C]: ")?,
        "3" => {
            let basis = read_line("1) 누적값에서 공제  2) 깊이 기준 공제: ")?;
            next.rainfall_basis = match basis.trim() {
                "2" => RainfallBasis::Depth,
                _ => RainfallBasis::RunningTotal,
            };
        }
        _ => {
            println!("잘못된 입력이므로 변경하지 않습니다.");
            return Ok(());
        }
    }
    match next.validate() {
        Ok(()) => {
            cfg.policy = next;
            println!("설정이 변경되었습니다.");
        }
        Err(e) => println!("변경하지 않습니다: {e}"),
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

/// 문자열 선택지를 읽는다. 빈 입력은 기본값.
fn read_choice<T: std::str::FromStr>(prompt: &str, default: T) -> Result<T, AppError> {
    loop {
        let s = read_line(prompt)?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("잘못된 입력입니다."),
        }
    }
}

fn read_slot_time(prompt: &str) -> Result<SlotTime, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<SlotTime>() {
            Ok(t) => return Ok(t),
            Err(e) => println!("{e}"),
        }
    }
}

fn read_area_unit(default: AreaUnit) -> Result<AreaUnit, AppError> {
    println!("면적 단위: 1=m² 2=ha 3=acre 4=ft² (엔터={})", default.symbol());
    let sel = read_line("선택: ")?;
    let unit = match sel.trim() {
        "1" => AreaUnit::SquareMeter,
        "2" => AreaUnit::Hectare,
        "3" => AreaUnit::Acre,
        "4" => AreaUnit::SquareFoot,
        _ => default,
    };
    Ok(unit)
}

fn read_temperature_unit(default: TemperatureUnit) -> Result<TemperatureUnit, AppError> {
    println!("온도 단위: 1=°C 2=°F 3=K (엔터={default:?})");
    let sel = read_line("선택: ")?;
    let unit = match sel.trim() {
        "1" => TemperatureUnit::Celsius,
        "2" => TemperatureUnit::Fahrenheit,
        "3" => TemperatureUnit::Kelvin,
        _ => default,
    };
    Ok(unit)
}

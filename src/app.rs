use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::pump::maintenance::MaintenanceError;
use crate::pump::pump_control::ControlError;
use crate::ui_cli::{self, Command, MenuChoice};
use crate::water::irrigation_schedule::ScheduleError;
use crate::water::usage_status::UsageError;
use crate::water::EstimateError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 단위 변환 오류
    Conversion(ConversionError),
    /// 물 수요 계산 입력 오류
    Estimate(EstimateError),
    /// 관개 일정 오류
    Schedule(ScheduleError),
    /// 급수 기록 입력 오류
    Usage(UsageError),
    /// 허용되지 않는 펌프 제어
    Control(ControlError),
    /// 점검 일정 오류
    Maintenance(MaintenanceError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Conversion(e) => write!(f, "단위 변환 오류: {e}"),
            AppError::Estimate(e) => write!(f, "물 수요 계산 오류: {e}"),
            AppError::Schedule(e) => write!(f, "관개 일정 오류: {e}"),
            AppError::Usage(e) => write!(f, "급수 기록 오류: {e}"),
            AppError::Control(e) => write!(f, "펌프 제어 오류: {e}"),
            AppError::Maintenance(e) => write!(f, "점검 일정 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ConversionError> for AppError {
    fn from(value: ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

impl From<EstimateError> for AppError {
    fn from(value: EstimateError) -> Self {
        AppError::Estimate(value)
    }
}

impl From<ScheduleError> for AppError {
    fn from(value: ScheduleError) -> Self {
        AppError::Schedule(value)
    }
}

impl From<UsageError> for AppError {
    fn from(value: UsageError) -> Self {
        AppError::Usage(value)
    }
}

impl From<ControlError> for AppError {
    fn from(value: ControlError) -> Self {
        AppError::Control(value)
    }
}

impl From<MaintenanceError> for AppError {
    fn from(value: MaintenanceError) -> Self {
        AppError::Maintenance(value)
    }
}

/// 하위 명령을 실행한다. 명령이 없으면 대화형 메뉴를 돈다.
pub fn run(
    command: Option<Command>,
    config: &mut Config,
    config_path: &Path,
) -> Result<(), AppError> {
    let table = config.crop_table()?;
    match command {
        Some(Command::Estimate(args)) => {
            let request = args.into_request(config)?;
            ui_cli::run_estimate(config, &table, &request)?;
        }
        Some(Command::Crops) => ui_cli::print_crops(&table),
        Some(Command::Convert {
            kind,
            value,
            from,
            to,
        }) => ui_cli::handle_unit_conversion(kind, value, &from, &to)?,
        Some(Command::PumpUsage {
            rating,
            power_kw,
            hours,
            rate,
        }) => {
            let power = power_kw.unwrap_or_else(|| rating.power_kw());
            let rate = rate.unwrap_or(config.policy.electricity_rate);
            ui_cli::handle_pump_usage(power, hours, rate);
        }
        Some(Command::FlowCheck { readings }) => ui_cli::handle_flow_check(config, &readings),
        Some(Command::PumpControl { status, action }) => {
            ui_cli::handle_pump_control(status, action)?
        }
        Some(Command::PumpAlerts(args)) => ui_cli::handle_pump_alerts(config, &args)?,
        Some(Command::UsageCheck {
            crop,
            liters,
            start,
            end,
        }) => ui_cli::handle_usage_check(config, &crop, liters, start, end)?,
        Some(Command::Settings) => ui_cli::print_settings(config),
        None => run_menu(config, config_path)?,
    }
    Ok(())
}

/// 대화형 메인 루프를 실행한다.
fn run_menu(config: &mut Config, config_path: &Path) -> Result<(), AppError> {
    loop {
        // 설정 변경 후에도 최신 작물표를 쓰도록 매번 다시 구성한다.
        let table = config.crop_table()?;
        let outcome = match ui_cli::main_menu()? {
            MenuChoice::Estimate => ui_cli::prompt_estimate(config, &table),
            MenuChoice::CropList => {
                ui_cli::print_crops(&table);
                Ok(())
            }
            MenuChoice::UnitConversion => ui_cli::prompt_unit_conversion(),
            MenuChoice::PumpUsage => ui_cli::prompt_pump_usage(config),
            MenuChoice::UsageCheck => ui_cli::prompt_usage_check(config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                config.save_to(config_path)?;
                Ok(())
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("프로그램을 종료합니다.");
                break;
            }
        };
        // 입력 오류는 메뉴로 돌아가고, 입출력 오류만 종료한다.
        match outcome {
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => println!("오류: {e}"),
            Ok(()) => {}
        }
    }
    Ok(())
}

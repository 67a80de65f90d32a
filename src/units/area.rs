use serde::{Deserialize, Serialize};

const SQUARE_METER_PER_HECTARE: f64 = 10_000.0;
const SQUARE_METER_PER_ACRE: f64 = 4046.86;
const SQUARE_METER_PER_SQUARE_FOOT: f64 = 0.092903;

/// 면적 단위. 내부 기준은 제곱미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareMeter,
    Hectare,
    Acre,
    SquareFoot,
}

/// 주어진 면적을 제곱미터로 환산한다.
pub fn to_square_meter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => value,
        AreaUnit::Hectare => value * SQUARE_METER_PER_HECTARE,
        AreaUnit::Acre => value * SQUARE_METER_PER_ACRE,
        AreaUnit::SquareFoot => value * SQUARE_METER_PER_SQUARE_FOOT,
    }
}

fn from_square_meter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => value,
        AreaUnit::Hectare => value / SQUARE_METER_PER_HECTARE,
        AreaUnit::Acre => value / SQUARE_METER_PER_ACRE,
        AreaUnit::SquareFoot => value / SQUARE_METER_PER_SQUARE_FOOT,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    let m2 = to_square_meter(value, from);
    from_square_meter(m2, to)
}

impl AreaUnit {
    /// 화면 표시용 약어.
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::Hectare => "ha",
            AreaUnit::Acre => "acre",
            AreaUnit::SquareFoot => "ft²",
        }
    }
}

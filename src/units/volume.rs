use serde::{Deserialize, Serialize};

/// 체적 단위. 내부 기준은 리터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Liter,
    CubicMeter,
    Milliliter,
    CubicFoot,
    UsGallon,
}

fn to_liter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Liter => value,
        VolumeUnit::CubicMeter => value * 1000.0,
        VolumeUnit::Milliliter => value / 1000.0,
        VolumeUnit::CubicFoot => value * 28.3168,
        VolumeUnit::UsGallon => value * 3.785_41,
    }
}

fn from_liter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Liter => value,
        VolumeUnit::CubicMeter => value / 1000.0,
        VolumeUnit::Milliliter => value * 1000.0,
        VolumeUnit::CubicFoot => value / 28.3168,
        VolumeUnit::UsGallon => value / 3.785_41,
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    let l = to_liter(value, from);
    from_liter(l, to)
}

impl VolumeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liter => "L",
            VolumeUnit::CubicMeter => "m³",
            VolumeUnit::Milliliter => "mL",
            VolumeUnit::CubicFoot => "ft³",
            VolumeUnit::UsGallon => "gal",
        }
    }
}

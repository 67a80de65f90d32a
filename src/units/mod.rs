//! 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod temperature;
pub mod volume;

pub use area::{convert_area, to_square_meter, AreaUnit};
pub use temperature::{convert_temperature, to_celsius, TemperatureUnit};
pub use volume::{convert_volume, VolumeUnit};

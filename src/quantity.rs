/// 단위 변환기가 다루는 물리량 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Temperature,
    Area,
    Volume,
}

impl std::str::FromStr for QuantityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" | "t" => Ok(QuantityKind::Temperature),
            "area" | "a" => Ok(QuantityKind::Area),
            "volume" | "v" => Ok(QuantityKind::Volume),
            other => Err(other.to_string()),
        }
    }
}

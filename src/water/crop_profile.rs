use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 토양 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Loamy,
    Sandy,
    Clay,
    Silt,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Loamy,
        SoilType::Sandy,
        SoilType::Clay,
        SoilType::Silt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loamy => "loamy",
            SoilType::Sandy => "sandy",
            SoilType::Clay => "clay",
            SoilType::Silt => "silt",
        }
    }
}

impl FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loamy" | "loam" => Ok(SoilType::Loamy),
            "sandy" | "sand" => Ok(SoilType::Sandy),
            "clay" => Ok(SoilType::Clay),
            "silt" | "silty" => Ok(SoilType::Silt),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 계절 구분. 계절 보정을 쓰는 호출자만 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Winter,
    Monsoon,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Summer, Season::Winter, Season::Monsoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Monsoon => "monsoon",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summer" => Ok(Season::Summer),
            "winter" => Ok(Season::Winter),
            "monsoon" | "rainy" => Ok(Season::Monsoon),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 작물별 물 수요 기준 데이터. 읽기 전용 참조 데이터로 취급한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    /// 단위 면적당 일일 기준 수요 (단위는 정책의 `base_need_unit`)
    pub base_water_need: f64,
    /// 고온 시 곱하고, 저온 시 역수를 곱하는 배율
    pub temperature_multiplier: f64,
    /// 토양별 배율. 없는 토양은 1.0
    pub soil_factors: BTreeMap<SoilType, f64>,
    /// 계절별 배율. 없는 계절은 1.0
    pub seasonal_adjustment: BTreeMap<Season, f64>,
    /// 권장 토양
    pub recommended_soil: Option<SoilType>,
}

impl CropProfile {
    pub fn new(base_water_need: f64, temperature_multiplier: f64) -> Self {
        Self {
            base_water_need,
            temperature_multiplier,
            soil_factors: BTreeMap::new(),
            seasonal_adjustment: BTreeMap::new(),
            recommended_soil: None,
        }
    }

    pub fn with_soil_factor(mut self, soil: SoilType, factor: f64) -> Self {
        self.soil_factors.insert(soil, factor);
        self
    }

    pub fn with_seasonal_adjustment(mut self, season: Season, factor: f64) -> Self {
        self.seasonal_adjustment.insert(season, factor);
        self
    }

    pub fn with_recommended_soil(mut self, soil: SoilType) -> Self {
        self.recommended_soil = Some(soil);
        self
    }

    /// 토양 배율을 조회한다. 표에 없으면 항등값 1.0.
    pub fn soil_factor(&self, soil: SoilType) -> f64 {
        self.soil_factors.get(&soil).copied().unwrap_or(1.0)
    }

    /// 계절 배율을 조회한다. 계절이 없거나 표에 없으면 1.0.
    pub fn seasonal_factor(&self, season: Option<Season>) -> f64 {
        season
            .and_then(|s| self.seasonal_adjustment.get(&s).copied())
            .unwrap_or(1.0)
    }

    /// 모든 배율이 유한한 양수인지 검사한다.
    fn validate(&self) -> Result<(), &'static str> {
        if !is_positive(self.base_water_need) {
            return Err("기준 수요는 0보다 커야 합니다");
        }
        if !is_positive(self.temperature_multiplier) {
            return Err("온도 배율은 0보다 커야 합니다");
        }
        if !self.soil_factors.values().all(|v| is_positive(*v)) {
            return Err("토양 배율은 0보다 커야 합니다");
        }
        if !self.seasonal_adjustment.values().all(|v| is_positive(*v)) {
            return Err("계절 배율은 0보다 커야 합니다");
        }
        Ok(())
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// 작물 키로 기준 데이터를 제공하는 참조 데이터 공급자.
pub trait CropCatalog {
    /// 작물 키(대소문자 무시)에 해당하는 기준 데이터를 찾는다.
    fn profile(&self, crop: &str) -> Option<&CropProfile>;
}

/// 작물 기준표 구성 시 발생 가능한 오류.
#[derive(Debug)]
pub enum CropTableError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 빈 작물 키
    EmptyKey,
    /// 배율 불변식 위반
    InvalidProfile { crop: String, reason: &'static str },
    /// 알 수 없는 토양 이름
    UnknownSoil { crop: String, name: String },
    /// 알 수 없는 계절 이름
    UnknownSeason { crop: String, name: String },
}

impl std::fmt::Display for CropTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropTableError::Io(e) => write!(f, "작물표 입출력 오류: {e}"),
            CropTableError::Parse(e) => write!(f, "작물표 파싱 오류: {e}"),
            CropTableError::EmptyKey => write!(f, "작물 이름이 비어 있습니다"),
            CropTableError::InvalidProfile { crop, reason } => {
                write!(f, "작물 '{crop}' 데이터 오류: {reason}")
            }
            CropTableError::UnknownSoil { crop, name } => {
                write!(f, "작물 '{crop}'에 알 수 없는 토양: {name}")
            }
            CropTableError::UnknownSeason { crop, name } => {
                write!(f, "작물 '{crop}'에 알 수 없는 계절: {name}")
            }
        }
    }
}

impl std::error::Error for CropTableError {}

impl From<std::io::Error> for CropTableError {
    fn from(value: std::io::Error) -> Self {
        CropTableError::Io(value)
    }
}

impl From<toml::de::Error> for CropTableError {
    fn from(value: toml::de::Error) -> Self {
        CropTableError::Parse(value)
    }
}

/// 검증을 거친 작물 기준표. 구성 후에는 변경하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct CropTable {
    crops: BTreeMap<String, CropProfile>,
}

impl CropTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 내장 기준표(밀, 벼).
    pub fn builtin() -> Self {
        let wheat = CropProfile::new(2.5, 1.2)
            .with_soil_factor(SoilType::Loamy, 1.0)
            .with_soil_factor(SoilType::Sandy, 1.3)
            .with_soil_factor(SoilType::Clay, 0.8)
            .with_soil_factor(SoilType::Silt, 1.1)
            .with_seasonal_adjustment(Season::Summer, 1.3)
            .with_seasonal_adjustment(Season::Winter, 0.8)
            .with_seasonal_adjustment(Season::Monsoon, 0.6)
            .with_recommended_soil(SoilType::Loamy);
        let rice = CropProfile::new(4.0, 1.3)
            .with_soil_factor(SoilType::Loamy, 1.1)
            .with_soil_factor(SoilType::Sandy, 1.4)
            .with_soil_factor(SoilType::Clay, 1.0)
            .with_soil_factor(SoilType::Silt, 1.2)
            .with_seasonal_adjustment(Season::Summer, 1.4)
            .with_seasonal_adjustment(Season::Winter, 0.9)
            .with_seasonal_adjustment(Season::Monsoon, 0.7)
            .with_recommended_soil(SoilType::Clay);

        let mut crops = BTreeMap::new();
        crops.insert("wheat".to_string(), wheat);
        crops.insert("rice".to_string(), rice);
        Self { crops }
    }

    /// 작물을 추가한다. 키는 소문자로 정규화하고 배율을 검증한다.
    pub fn insert(&mut self, crop: &str, profile: CropProfile) -> Result<(), CropTableError> {
        let key = normalize_key(crop);
        if key.is_empty() {
            return Err(CropTableError::EmptyKey);
        }
        profile
            .validate()
            .map_err(|reason| CropTableError::InvalidProfile {
                crop: key.clone(),
                reason,
            })?;
        self.crops.insert(key, profile);
        Ok(())
    }

    /// TOML 문자열에서 기준표를 읽는다.
    ///
    /// ```toml
    /// [crops.wheat]
    /// base_water_need = 2.5
    /// temperature_multiplier = 1.2
    /// recommended_soil = "loamy"
    /// soil_factors = { loamy = 1.0, sandy = 1.3 }
    /// seasonal_adjustment = { summer = 1.3 }
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, CropTableError> {
        let file: CropTableFile = toml::from_str(content)?;
        let mut table = Self::new();
        for (name, entry) in file.crops {
            let profile = entry.into_profile(&name)?;
            table.insert(&name, profile)?;
        }
        Ok(table)
    }

    /// TOML 파일에서 기준표를 읽는다.
    pub fn load(path: &Path) -> Result<Self, CropTableError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 다른 기준표의 항목으로 덮어쓴다.
    pub fn merge(&mut self, other: CropTable) {
        self.crops.extend(other.crops);
    }

    pub fn crops(&self) -> impl Iterator<Item = (&str, &CropProfile)> {
        self.crops.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl CropCatalog for CropTable {
    fn profile(&self, crop: &str) -> Option<&CropProfile> {
        self.crops.get(&normalize_key(crop))
    }
}

fn normalize_key(crop: &str) -> String {
    crop.trim().to_lowercase()
}

#[derive(Debug, Deserialize)]
struct CropTableFile {
    #[serde(default)]
    crops: BTreeMap<String, CropEntry>,
}

#[derive(Debug, Deserialize)]
struct CropEntry {
    base_water_need: f64,
    temperature_multiplier: f64,
    #[serde(default)]
    soil_factors: BTreeMap<String, f64>,
    #[serde(default)]
    seasonal_adjustment: BTreeMap<String, f64>,
    #[serde(default)]
    recommended_soil: Option<String>,
}

impl CropEntry {
    fn into_profile(self, crop: &str) -> Result<CropProfile, CropTableError> {
        let unknown_soil = |name: String| CropTableError::UnknownSoil {
            crop: crop.to_string(),
            name,
        };
        let mut profile = CropProfile::new(self.base_water_need, self.temperature_multiplier);
        for (name, factor) in self.soil_factors {
            let soil = name.parse::<SoilType>().map_err(unknown_soil)?;
            profile.soil_factors.insert(soil, factor);
        }
        for (name, factor) in self.seasonal_adjustment {
            let season = name
                .parse::<Season>()
                .map_err(|name| CropTableError::UnknownSeason {
                    crop: crop.to_string(),
                    name,
                })?;
            profile.seasonal_adjustment.insert(season, factor);
        }
        if let Some(name) = self.recommended_soil {
            profile.recommended_soil = Some(name.parse::<SoilType>().map_err(unknown_soil)?);
        }
        Ok(profile)
    }
}

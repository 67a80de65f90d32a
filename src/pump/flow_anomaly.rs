use serde::{Deserialize, Serialize};

/// 유량 이상 판정 배율.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowAnomalyThresholds {
    /// 평균의 이 배율을 넘으면 과유량
    pub high_ratio: f64,
    /// 평균의 이 배율보다 낮으면 저유량
    pub low_ratio: f64,
}

impl Default for FlowAnomalyThresholds {
    fn default() -> Self {
        Self {
            high_ratio: 1.5,
            low_ratio: 0.5,
        }
    }
}

/// 유량계 측정값.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowReading {
    /// 측정 시각 표기 (형식은 호출자 정의)
    pub at: String,
    /// 유량 [L/min]
    pub flow_rate: f64,
}

/// 유량 이상 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// 평균보다 크게 많음 (파열, 큰 누수)
    HighFlow,
    /// 평균보다 크게 적음 (막힘, 작은 누수)
    LowFlow,
}

impl AnomalyKind {
    /// 이상 종류별 점검 안내.
    pub fn advice(&self) -> &'static str {
        match self {
            AnomalyKind::HighFlow => {
                "배관 파열 또는 큰 누수가 의심됩니다. 배관과 연결부를 점검하세요."
            }
            AnomalyKind::LowFlow => {
                "막힘 또는 작은 누수가 의심됩니다. 필터 막힘이나 배관 손상을 점검하세요."
            }
        }
    }
}

/// 이상으로 판정된 측정값 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowAnomaly {
    /// 측정 시각 표기
    pub at: String,
    /// 유량 [L/min]
    pub flow_rate: f64,
    pub kind: AnomalyKind,
}

/// 유량 이상 판정 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCheckReport {
    pub mean_flow: f64,
    pub anomalies: Vec<FlowAnomaly>,
}

impl FlowCheckReport {
    pub fn has_leakage(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// 이상 항목마다 점검 안내를 하나씩 만든다.
    pub fn recommendations(&self) -> Vec<&'static str> {
        self.anomalies.iter().map(|a| a.kind.advice()).collect()
    }
}

/// 평균 유량 대비 크게 벗어난 측정값을 찾는다. 측정값이 없으면 이상 없음.
pub fn detect_flow_anomalies(
    readings: &[FlowReading],
    thresholds: &FlowAnomalyThresholds,
) -> FlowCheckReport {
    if readings.is_empty() {
        return FlowCheckReport {
            mean_flow: 0.0,
            anomalies: Vec::new(),
        };
    }
    let mean_flow = readings.iter().map(|r| r.flow_rate).sum::<f64>() / readings.len() as f64;
    let high = mean_flow * thresholds.high_ratio;
    let low = mean_flow * thresholds.low_ratio;
    let anomalies = readings
        .iter()
        .filter_map(|r| {
            let kind = if r.flow_rate > high {
                AnomalyKind::HighFlow
            } else if r.flow_rate < low {
                AnomalyKind::LowFlow
            } else {
                return None;
            };
            Some(FlowAnomaly {
                at: r.at.clone(),
                flow_rate: r.flow_rate,
                kind,
            })
        })
        .collect();
    FlowCheckReport {
        mean_flow,
        anomalies,
    }
}

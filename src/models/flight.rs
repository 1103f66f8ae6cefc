use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 航班搜索请求，字段缺失在本地校验，不进入上游
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub passengers: Option<PassengerCount>,
}

/// 下拉框的值以字符串提交，数字和数字字符串都接受
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassengerCount {
    Count(u32),
    Text(String),
}

impl PassengerCount {
    // 空字符串视为未填写
    fn resolve(self) -> Result<Option<u32>, AppError> {
        match self {
            PassengerCount::Count(n) => Ok(Some(n)),
            PassengerCount::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse().map(Some).map_err(|_| {
                    AppError::Validation(format!("Invalid passengers value: {:?}", text))
                })
            }
        }
    }
}

/// 校验通过后的搜索参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: u32,
}

impl FlightSearchRequest {
    pub fn validate(self) -> Result<FlightSearchParams, AppError> {
        let origin = present(self.origin);
        let destination = present(self.destination);
        let departure_date = present(self.departure_date);

        let missing: Vec<&str> = [
            ("origin", origin.is_none()),
            ("destination", destination.is_none()),
            ("departureDate", departure_date.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(origin), Some(destination), Some(departure_date)) =
            (origin, destination, departure_date)
        else {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let passengers = match self.passengers {
            Some(count) => count.resolve()?,
            None => None,
        };

        Ok(FlightSearchParams {
            origin: origin.to_uppercase(),
            destination: destination.to_uppercase(),
            departure_date,
            return_date: present(self.return_date),
            passengers: passengers.unwrap_or(1).max(1),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 上游航班报价，原样透传
#[derive(Debug, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub dictionaries: serde_json::Value,
}

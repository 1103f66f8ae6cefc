use serde::{Deserialize, Serialize};

/// 自动补全的一条候选地点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub id: String,
    pub code: String,
    pub display_name: String,
    pub city_name: String,
    pub country_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl SuggestionItem {
    /// 选中后展示给用户的文本，例如 `London (LHR)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.city_name, self.code)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub data: Vec<SuggestionItem>,
}

// 上游地点接口的原始结构
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub address: ProviderAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAddress {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub country_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderLocations {
    #[serde(default)]
    pub data: Vec<ProviderLocation>,
}

impl ProviderLocation {
    /// 没有 IATA 代码的记录无法作为搜索参数，直接丢弃
    pub fn into_suggestion(self) -> Option<SuggestionItem> {
        let code = self.iata_code.filter(|code| !code.is_empty())?;
        let city_name = if self.address.city_name.is_empty() {
            self.name.clone()
        } else {
            self.address.city_name
        };
        Some(SuggestionItem {
            id: self.id.unwrap_or_else(|| code.clone()),
            code,
            display_name: self.name,
            city_name,
            country_name: self.address.country_name,
            sub_type: self.sub_type,
        })
    }
}

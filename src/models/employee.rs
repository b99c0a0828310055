use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};
use crate::utils::time::parse_timestamp;

/// Canonical employee status. Both dashboard vocabularies map onto it and any
/// other value is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmployeeStatus {
    Active,
    Vacation,
    Leave,
    Training,
    AtRisk,
    Inactive,
    Other(String),
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Vacation => "vacation",
            EmployeeStatus::Leave => "leave",
            EmployeeStatus::Training => "training",
            EmployeeStatus::AtRisk => "at-risk",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EmployeeStatus::Active => "Ativo",
            EmployeeStatus::Vacation => "Férias",
            EmployeeStatus::Leave => "Licença",
            EmployeeStatus::Training => "Treinamento",
            EmployeeStatus::AtRisk => "Em Risco",
            EmployeeStatus::Inactive => "Inativo",
            EmployeeStatus::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for EmployeeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => EmployeeStatus::Active,
            "vacation" => EmployeeStatus::Vacation,
            "leave" => EmployeeStatus::Leave,
            "training" => EmployeeStatus::Training,
            "at-risk" => EmployeeStatus::AtRisk,
            "inactive" => EmployeeStatus::Inactive,
            _ => EmployeeStatus::Other(value),
        }
    }
}

impl From<&str> for EmployeeStatus {
    fn from(value: &str) -> Self {
        EmployeeStatus::from(value.to_string())
    }
}

impl From<EmployeeStatus> for String {
    fn from(value: EmployeeStatus) -> Self {
        match value {
            EmployeeStatus::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub status: EmployeeStatus,
    pub performance: u8,
    pub satisfaction: u8,
    pub productivity: u8,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Employee {
    /// Scores are percentages; anything above 100 is rejected.
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("performance", self.performance),
            ("satisfaction", self.satisfaction),
            ("productivity", self.productivity),
        ] {
            if value > 100 {
                return Err(AppError::validation(format!(
                    "funcionário #{}: {field} fora do intervalo [0,100] ({value})",
                    self.id
                )));
            }
        }
        Ok(())
    }

    pub fn is_at_risk(&self) -> bool {
        self.performance < 80 || self.satisfaction < 80
    }
}

pub fn validate_employees(employees: &[Employee]) -> AppResult<()> {
    employees.iter().try_for_each(Employee::validate)
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {value}"))),
    }
}

use std::fmt;

use serde::Serialize;

use crate::models::chart::ChartTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Dashboard,
    Employees,
    Recommendations,
    Analytics,
    Settings,
    About,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Dashboard,
        PageId::Employees,
        PageId::Recommendations,
        PageId::Analytics,
        PageId::Settings,
        PageId::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Dashboard => "dashboard",
            PageId::Employees => "employees",
            PageId::Recommendations => "recommendations",
            PageId::Analytics => "analytics",
            PageId::Settings => "settings",
            PageId::About => "about",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::Dashboard => "Dashboard",
            PageId::Employees => "Funcionários",
            PageId::Recommendations => "Recomendações",
            PageId::Analytics => "Analytics",
            PageId::Settings => "Configurações",
            PageId::About => "Sobre",
        }
    }

    /// Resolves a page id or a URL fragment (`#employees`). Unknown or empty
    /// input resolves to the dashboard.
    pub fn resolve(value: &str) -> Self {
        Self::parse(value).unwrap_or(PageId::Dashboard)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().trim_start_matches('#');
        PageId::ALL.into_iter().find(|page| page.as_str() == key)
    }

    pub fn has_data_dependency(&self) -> bool {
        matches!(
            self,
            PageId::Dashboard | PageId::Employees | PageId::Recommendations | PageId::Analytics
        )
    }

    pub fn chart_targets(&self) -> &'static [ChartTarget] {
        match self {
            PageId::Dashboard => &[ChartTarget::Performance],
            PageId::Analytics => &[
                ChartTarget::Department,
                ChartTarget::Satisfaction,
                ChartTarget::Status,
            ],
            _ => &[],
        }
    }
}

impl Default for PageId {
    fn default() -> Self {
        PageId::Dashboard
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKind {
    EmployeeCard,
    EmployeeListItem,
    RecommendationCard,
    RecommendationListItem,
    RecommendationDetail,
    MetricsSummary,
    AnalyticsSummary,
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Excellent,
    Good,
    Fair,
    Poor,
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Excellent => "excellent",
            Tone::Good => "good",
            Tone::Fair => "fair",
            Tone::Poor => "poor",
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentField {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

/// Status or priority marker: `key` is the raw vocabulary value, `label` the display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum FragmentAction {
    OpenRecommendation(u64),
}

/// Renderer-agnostic description of one piece of UI content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub kind: FragmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<u64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FragmentField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FragmentAction>,
}

impl Fragment {
    pub fn new(kind: FragmentKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: None,
            title: title.into(),
            subtitle: None,
            image: None,
            badges: Vec::new(),
            fields: Vec::new(),
            items: Vec::new(),
            action: None,
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(FragmentKind::NoData, message)
    }

    pub fn with_entity(mut self, id: u64) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_badge(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.badges.push(Badge {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.push(FragmentField {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            tone: None,
        });
        self
    }

    pub fn with_toned_field(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        tone: Tone,
    ) -> Self {
        self.fields.push(FragmentField {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            tone: Some(tone),
        });
        self
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    pub fn with_action(mut self, action: FragmentAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn field(&self, key: &str) -> Option<&FragmentField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn is_no_data(&self) -> bool {
        self.kind == FragmentKind::NoData
    }

    /// Flattened display text, used by plain-text bindings and for lookups.
    pub fn text_content(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(id) = self.entity_id {
            parts.push(format!("#{id}"));
        }
        parts.push(self.title.clone());
        parts.extend(self.subtitle.iter().cloned());
        parts.extend(self.badges.iter().map(|badge| badge.label.clone()));
        parts.extend(
            self.fields
                .iter()
                .map(|field| format!("{}: {}", field.label, field.value)),
        );
        parts.extend(self.items.iter().cloned());
        parts.join("\n")
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_content().contains(needle)
    }
}

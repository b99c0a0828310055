use serde::Serialize;
use tracing::debug;

use crate::models::page::PageId;

/// Identifies one navigation. Data fetched under a token is only applied
/// while the token is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageToken {
    pub page: PageId,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    active: PageId,
    previous: Option<PageId>,
    generation: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at the page named by a URL fragment such as `#employees`.
    pub fn from_fragment(fragment: &str) -> Self {
        Self {
            active: PageId::resolve(fragment),
            previous: None,
            generation: 0,
        }
    }

    pub fn resolve_initial(&mut self, fragment: &str) -> PageToken {
        self.go_to(fragment)
    }

    /// Exactly one page is active after this returns. Unknown ids fall back
    /// to the dashboard.
    pub fn go_to(&mut self, page: &str) -> PageToken {
        self.show(PageId::resolve(page))
    }

    pub fn show(&mut self, page: PageId) -> PageToken {
        if self.active != page {
            self.previous = Some(self.active);
        }
        self.active = page;
        self.generation += 1;
        debug!(
            target: "app::navigation",
            page = page.as_str(),
            generation = self.generation,
            "page activated"
        );
        self.token()
    }

    pub fn token(&self) -> PageToken {
        PageToken {
            page: self.active,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: PageToken) -> bool {
        token.generation == self.generation && token.page == self.active
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    pub fn previous(&self) -> Option<PageId> {
        self.previous
    }

    pub fn title(&self) -> &'static str {
        self.active.title()
    }

    pub fn is_active(&self, page: PageId) -> bool {
        self.active == page
    }
}

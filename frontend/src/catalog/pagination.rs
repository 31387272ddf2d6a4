use serde::{Deserialize, Serialize};

/// Session-lifetime pagination bookkeeping, reconciled between what the
/// server reports and a locally computed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_items: u32,
    pub items_per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total_items: 0,
            items_per_page: 12,
            current_page: 1,
            total_pages: 1,
        }
    }
}

/// Server-reported pagination. Every field is optional so a partial block
/// merges over local state; the aliases cover the spellings the API has used
/// over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageUpdate {
    #[serde(default, alias = "totalItems")]
    pub total_items: Option<u32>,
    #[serde(default, alias = "itemsPerPage", alias = "limit")]
    pub items_per_page: Option<u32>,
    #[serde(default, alias = "currentPage", alias = "page")]
    pub current_page: Option<u32>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

impl Pagination {
    /// Server values win field-by-field; absent fields keep local state.
    pub fn apply_update(&mut self, update: PageUpdate) {
        if let Some(total_items) = update.total_items {
            self.total_items = total_items;
        }
        // the page size must stay positive; a zero from the server counts
        // as not reported
        if let Some(items_per_page) = update.items_per_page.filter(|&v| v > 0) {
            self.items_per_page = items_per_page;
        }
        if let Some(current_page) = update.current_page {
            self.current_page = current_page;
        }
        if let Some(total_pages) = update.total_pages {
            self.total_pages = total_pages;
        }
    }

    /// Fallback for responses without a pagination block: derive the totals
    /// from the list length, leaving the page window alone.
    pub fn recompute(&mut self, total_items: u32) {
        self.total_items = total_items;
        self.total_pages =
            ((total_items + self.items_per_page - 1) / self.items_per_page).max(1);
    }

    /// Fetch-completed event: authoritative server pagination when present,
    /// locally computed totals otherwise. Idempotent per payload.
    pub fn reconcile(&mut self, server: Option<PageUpdate>, product_count: usize) {
        match server {
            Some(update) => self.apply_update(update),
            None => self.recompute(product_count as u32),
        }
    }

    /// Direct page navigation; bounds are the caller's concern.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }
}

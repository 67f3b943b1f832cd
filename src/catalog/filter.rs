use super::models::Item;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub selected_category: String,
}

impl FilterState {
    pub fn new(search_text: String, selected_category: String) -> Self {
        Self {
            search_text,
            selected_category,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        let query = self.search_text.trim().to_lowercase();
        self.matches_category(item) && item.title.to_lowercase().contains(&query)
    }

    fn matches_category(&self, item: &Item) -> bool {
        self.selected_category == ALL_CATEGORIES || item.category == self.selected_category
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(String::new(), ALL_CATEGORIES.to_string())
    }
}

/// Items visible under `filter`, in catalog order.
pub fn filter_items<'a>(items: &'a [Item], filter: &FilterState) -> Vec<&'a Item> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

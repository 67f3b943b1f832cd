use super::filter::ALL_CATEGORIES;
use serde::{Deserialize, Serialize};

const BUILTIN_BOOKS: &[(u32, &str, &str, &str)] = &[
    (1, "The Alchemist", "Paulo Coelho", "Novel"),
    (2, "Blindness", "José Saramago", "Novel"),
    (3, "Animal Farm", "George Orwell", "Politics"),
    (4, "The Great Speech", "Mustafa Kemal Atatürk", "History"),
    (5, "The Little Prince", "Antoine de Saint-Exupéry", "Children"),
    (6, "1984", "George Orwell", "Dystopia"),
    (7, "Don Quixote", "Miguel de Cervantes", "Classic"),
    (8, "The Metamorphosis", "Franz Kafka", "Modern Classic"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub category: String,
}

impl Item {
    pub fn new(id: u32, title: &str, author: &str, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
        }
    }
}

/// The fixed list of items available for browsing.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn builtin() -> Self {
        let items = BUILTIN_BOOKS
            .iter()
            .map(|&(id, title, author, category)| Item::new(id, title, author, category))
            .collect();
        Self::new(items)
    }

    pub fn find(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The `all` sentinel followed by every distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in &self.items {
            if !categories[1..].contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.items.iter().any(|item| item.category == category)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }
}

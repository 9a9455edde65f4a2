//! Category model and the read-only category directory
//!
//! Categories are named buckets with a fixed income/expense type. Default
//! categories are seeded by the store and can be renamed but never deleted
//! or moved to the other type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Icon keys a category can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Education,
    Bills,
    Home,
    Salary,
    Bonus,
    Investment,
    Gift,
    Other,
}

impl CategoryIcon {
    /// Map a stored icon key to a known icon
    ///
    /// Keys are matched case-insensitively; anything unrecognized becomes
    /// [`CategoryIcon::Other`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "food" | "restaurant" | "fastfood" => Self::Food,
            "transport" | "car" | "bus" | "directions_car" => Self::Transport,
            "shopping" | "shopping_cart" | "cart" => Self::Shopping,
            "entertainment" | "movie" | "game" => Self::Entertainment,
            "health" | "medical" | "hospital" => Self::Health,
            "education" | "school" | "book" => Self::Education,
            "bills" | "receipt" | "bill" => Self::Bills,
            "home" | "house" | "rent" => Self::Home,
            "salary" | "work" | "wallet" => Self::Salary,
            "bonus" | "star" => Self::Bonus,
            "investment" | "trending_up" | "chart" => Self::Investment,
            "gift" | "card_giftcard" => Self::Gift,
            _ => Self::Other,
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Whether this category classifies income or expenses
    pub kind: TransactionType,

    /// Optional icon key
    #[serde(default)]
    pub icon: Option<CategoryIcon>,

    /// Seeded by the store; cannot be deleted or change type
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Create a new user category
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            icon: None,
            is_default: false,
        }
    }

    /// Create a seeded default category
    pub fn default_category(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        let mut category = Self::new(id, name, kind);
        category.is_default = true;
        category
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: CategoryIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Whether this category may be deleted
    pub fn can_delete(&self) -> bool {
        !self.is_default
    }

    /// Move the category to the other type
    pub fn set_kind(&mut self, kind: TransactionType) -> Result<(), CategoryValidationError> {
        if self.is_default && self.kind != kind {
            return Err(CategoryValidationError::DefaultTypeChange);
        }
        self.kind = kind;
        Ok(())
    }

    /// Check the fields every stored category must have
    pub fn validate_required(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(())
    }

    /// Validate the category for editing
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        self.validate_required()?;

        let len = self.name.chars().count();
        if len > 50 {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    DefaultTypeChange,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::DefaultTypeChange => write!(f, "Default categories cannot change type"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Read-only lookup over the categories of one snapshot
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryDirectory {
    /// Build a directory, keeping the source order
    ///
    /// If an id appears twice the first record wins.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            index.entry(category.id.clone()).or_insert(pos);
        }
        Self { categories, index }
    }

    /// Look up a category by id
    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.index.get(id).map(|&pos| &self.categories[pos])
    }

    /// Find a category by id, or by name ignoring case
    pub fn find(&self, query: &str) -> Option<&Category> {
        self.get(&CategoryId::from(query)).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(query.trim()))
        })
    }

    /// Categories of one type, in source order
    pub fn of_kind(&self, kind: TransactionType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// Name of the category, or `fallback` if the id is unknown
    pub fn name_or<'a>(&'a self, id: &CategoryId, fallback: &'a str) -> &'a str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> CategoryDirectory {
        CategoryDirectory::new(vec![
            Category::default_category("salary", "Salary", TransactionType::Income),
            Category::new("food", "Food", TransactionType::Expense).with_icon(CategoryIcon::Food),
            Category::new("transport", "Transport", TransactionType::Expense),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let dir = directory();
        assert_eq!(dir.get(&"food".into()).unwrap().name, "Food");
        assert!(dir.get(&"missing".into()).is_none());
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn test_find_by_id_or_name() {
        let dir = directory();
        assert_eq!(dir.find("transport").unwrap().id.as_str(), "transport");
        assert_eq!(dir.find("FOOD").unwrap().id.as_str(), "food");
        assert!(dir.find("rent").is_none());
    }

    #[test]
    fn test_lookup_by_kind_keeps_order() {
        let dir = directory();
        let names: Vec<_> = dir
            .of_kind(TransactionType::Expense)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Transport"]);
    }

    #[test]
    fn test_name_fallback() {
        let dir = directory();
        assert_eq!(dir.name_or(&"food".into(), "Unknown"), "Food");
        assert_eq!(dir.name_or(&"gone".into(), "Unknown"), "Unknown");
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let dir = CategoryDirectory::new(vec![
            Category::new("a", "First", TransactionType::Expense),
            Category::new("a", "Second", TransactionType::Expense),
        ]);
        assert_eq!(dir.get(&"a".into()).unwrap().name, "First");
    }

    #[test]
    fn test_default_category_rules() {
        let mut salary = Category::default_category("salary", "Salary", TransactionType::Income);
        assert!(!salary.can_delete());
        assert_eq!(
            salary.set_kind(TransactionType::Expense),
            Err(CategoryValidationError::DefaultTypeChange)
        );
        assert!(salary.set_kind(TransactionType::Income).is_ok());

        let mut food = Category::new("food", "Food", TransactionType::Expense);
        assert!(food.can_delete());
        food.set_kind(TransactionType::Income).unwrap();
        assert_eq!(food.kind, TransactionType::Income);
    }

    #[test]
    fn test_validation() {
        let blank = Category::new("x", "  ", TransactionType::Expense);
        assert_eq!(blank.validate(), Err(CategoryValidationError::EmptyName));

        let long = Category::new("x", "a".repeat(51), TransactionType::Expense);
        assert_eq!(long.validate(), Err(CategoryValidationError::NameTooLong(51)));
    }

    #[test]
    fn test_icon_keys() {
        assert_eq!(CategoryIcon::from_key("Restaurant"), CategoryIcon::Food);
        assert_eq!(CategoryIcon::from_key("directions_car"), CategoryIcon::Transport);
        assert_eq!(CategoryIcon::from_key("sparkles"), CategoryIcon::Other);
    }
}

//! Default work-type catalog, seeded into an empty backend at startup.
//!
//! The order numbers follow the real sequencing of finishing works on site:
//! rough works first, then finishing, structures, ceilings and final works.

use crate::models::WorkTypeInput;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_ROUGH: &str = "Черновые";
pub const CATEGORY_FINISHING: &str = "Отделочные";
pub const CATEGORY_CEILINGS: &str = "Потолки";
pub const CATEGORY_STRUCTURES: &str = "Конструкции";
pub const CATEGORY_FINAL: &str = "Завершающие";

/// Categories in the order the dashboard offers them as filters.
pub const CATEGORIES: &[&str] = &[
    CATEGORY_ROUGH,
    CATEGORY_FINISHING,
    CATEGORY_CEILINGS,
    CATEGORY_STRUCTURES,
    CATEGORY_FINAL,
];

// ---------------------------------------------------------------------------
// Default work types
// ---------------------------------------------------------------------------

/// `(name, order, color, category)` for every default work type.
pub const DEFAULT_WORK_TYPES: &[(&str, i32, &str, &str)] = &[
    ("Штукатурка", 1, "#e53e3e", CATEGORY_ROUGH),
    ("Стяжка", 2, "#fd7900", CATEGORY_ROUGH),
    ("Утеплитель", 3, "#fbb917", CATEGORY_ROUGH),
    ("Шпаклёвка", 4, "#38a169", CATEGORY_FINISHING),
    ("Шпатлёвка", 5, "#38a169", CATEGORY_FINISHING),
    ("Плитка", 6, "#3182ce", CATEGORY_FINISHING),
    ("Сапожок", 7, "#805ad5", CATEGORY_FINISHING),
    ("Шкурка", 8, "#667eea", CATEGORY_FINISHING),
    ("Покраска", 9, "#e53e3e", CATEGORY_FINISHING),
    ("Покраска стен", 10, "#718096", CATEGORY_FINISHING),
    ("Сапожок (после дверников)", 11, "#4a5568", CATEGORY_FINISHING),
    ("ГКЛ", 12, "#9c88ff", CATEGORY_STRUCTURES),
    ("Армстронг", 13, "#48bb78", CATEGORY_CEILINGS),
    ("Грильято", 14, "#ed8936", CATEGORY_CEILINGS),
    ("Монтаж табличек", 15, "#fd7900", CATEGORY_FINAL),
    ("Уборка", 16, "#38a169", CATEGORY_FINAL),
];

/// The default catalog as creation payloads, in sequence order.
pub fn default_work_types() -> Vec<WorkTypeInput> {
    DEFAULT_WORK_TYPES
        .iter()
        .map(|&(name, order, color, category)| WorkTypeInput {
            name: name.to_string(),
            order,
            color: color.to_string(),
            category: category.to_string(),
        })
        .collect()
}

pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

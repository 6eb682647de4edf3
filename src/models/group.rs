use serde::{Deserialize, Deserializer, Serialize};

/// Group category. Values outside the known set are kept verbatim so data
/// written by another client survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Classes,
    Projects,
    Social,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Classes => "Classes",
            Category::Projects => "Projects",
            Category::Social => "Social",
            Category::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Classes" => Category::Classes,
            "Projects" => Category::Projects,
            "Social" => Category::Social,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Card accent color. Purely presentational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Blue,
    Purple,
    Emerald,
    Amber,
    Rose,
    Other(String),
}

impl Color {
    pub fn as_str(&self) -> &str {
        match self {
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Emerald => "emerald",
            Color::Amber => "amber",
            Color::Rose => "rose",
            Color::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        match s.as_str() {
            "blue" => Color::Blue,
            "purple" => Color::Purple,
            "emerald" => Color::Emerald,
            "amber" => Color::Amber,
            "rose" => Color::Rose,
            _ => Color::Other(s),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        match color {
            Color::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// A single group card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "missing_category", deserialize_with = "category_or_missing")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: Color,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
}

fn default_color() -> Color {
    Color::Blue
}

fn missing_category() -> Category {
    Category::Other(String::new())
}

/// Saved data may carry `null` where a value is expected
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn category_or_missing<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Category::from)
        .unwrap_or_else(missing_category))
}

fn color_or_default<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Color::from)
        .unwrap_or_else(default_color))
}

impl GroupRecord {
    pub fn new(id: i64, fields: GroupForm) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            link: fields.link,
            notes: fields.notes,
            color: fields.color,
            pinned: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Replace every editable field, keeping `id` and `pinned`.
    pub fn apply(&mut self, fields: GroupForm) {
        self.name = fields.name;
        self.category = fields.category;
        self.link = fields.link;
        self.notes = fields.notes;
        self.color = fields.color;
    }

    /// The chat link as a navigation target, if one is set.
    pub fn chat_link(&self) -> Option<&str> {
        if self.link.is_empty() {
            None
        } else {
            Some(&self.link)
        }
    }

    /// Case-insensitive match against name and notes. `needle` must already
    /// be lowercased.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.notes.to_lowercase().contains(needle)
    }
}

/// The user-editable fields of a group, as submitted from the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupForm {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub notes: String,
    pub color: Color,
}

impl Default for GroupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::Classes,
            link: String::new(),
            notes: String::new(),
            color: Color::Blue,
        }
    }
}

impl GroupForm {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Pre-fill the form for editing an existing record.
    pub fn from_record(record: &GroupRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            link: record.link.clone(),
            notes: record.notes.clone(),
            color: record.color.clone(),
        }
    }
}

/// Category selection for the view, including the catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sidebar order.
    pub const ALL_FILTERS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Classes),
        CategoryFilter::Only(Category::Projects),
        CategoryFilter::Only(Category::Social),
    ];

    pub fn parse(s: &str) -> Self {
        if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All Groups",
            CategoryFilter::Only(Category::Classes) => "Study Subjects",
            CategoryFilter::Only(Category::Projects) => "Project Teams",
            CategoryFilter::Only(Category::Social) => "Unofficial",
            CategoryFilter::Only(Category::Other(s)) => s.as_str(),
        }
    }

    pub fn matches(&self, record: &GroupRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &record.category == category,
        }
    }
}

/// Sidebar entry: a filter with the number of groups it selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

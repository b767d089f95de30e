use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HobbyCategory {
    pub id: Uuid,
    pub name: String,
}

impl HobbyCategory {
    pub fn new(name: String) -> Self {
        Self { id: Uuid::new_v4(), name }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Hobby {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
}

impl Hobby {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category_id: None,
            description: None,
        }
    }

    pub fn description_display(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => "No description",
        }
    }
}

/// Label for a hobby's category, with a placeholder when it has none.
pub fn category_display<'a>(category: Option<&'a HobbyCategory>) -> &'a str {
    category.map(|c| c.name.as_str()).unwrap_or("No category")
}

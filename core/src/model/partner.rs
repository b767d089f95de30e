use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    /// Set for people registered through the organizer; listings filter on it.
    #[serde(default)]
    pub in_organizer: bool,
}

impl Partner {
    pub fn new(name: String) -> Self {
        let short_name = short_name(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            short_name,
            in_organizer: false,
        }
    }
}

/// "Ada King Lovelace" -> "A. K. L."
pub fn short_name(name: &str) -> String {
    let initials: Vec<String> = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_string())
        .collect();
    if initials.is_empty() {
        return String::new();
    }
    format!("{}.", initials.join(". "))
}

//! Category and subcategory model.
//!
//! # Responsibility
//! - Define the two-level taxonomy entries are filed under.
//! - Hold the per-subcategory prompt templates.
//!
//! # Invariants
//! - `Subcategory::category_id` always names the category that owns it.
//! - `order` values are unique within one parent and grow on creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable category identifier.
pub type CategoryId = String;

/// Stable subcategory identifier.
pub type SubcategoryId = String;

/// Which of the three subcategory templates to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Evaluation,
    Planning,
    Synthesis,
}

impl PromptKind {
    /// All kinds in display order.
    pub const ALL: [PromptKind; 3] = [Self::Evaluation, Self::Planning, Self::Synthesis];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Evaluation => "evaluation",
            Self::Planning => "planning",
            Self::Synthesis => "synthesis",
        }
    }
}

impl Display for PromptKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown prompt kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePromptKindError(pub String);

impl Display for ParsePromptKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported prompt kind `{}`; expected evaluation|planning|synthesis",
            self.0
        )
    }
}

impl Error for ParsePromptKindError {}

impl FromStr for PromptKind {
    type Err = ParsePromptKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "evaluation" => Ok(Self::Evaluation),
            "planning" => Ok(Self::Planning),
            "synthesis" => Ok(Self::Synthesis),
            other => Err(ParsePromptKindError(other.to_string())),
        }
    }
}

/// Raw templates for one subcategory.
///
/// Each template is expected to carry one `{{CONTEXT}}` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplates {
    pub evaluation: String,
    pub planning: String,
    pub synthesis: String,
}

impl PromptTemplates {
    /// Returns the template for `kind`.
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Evaluation => &self.evaluation,
            PromptKind::Planning => &self.planning,
            PromptKind::Synthesis => &self.synthesis,
        }
    }
}

/// Second-level grouping under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    /// Non-owning back-reference to the parent category.
    pub category_id: CategoryId,
    pub order: i64,
    pub prompt_templates: PromptTemplates,
}

/// Top-level grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Emoji literal. Legacy icon names are rewritten on load.
    pub icon: String,
    pub order: i64,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Looks up an owned subcategory by id.
    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|sub| sub.id == id)
    }

    /// Returns whether `id` names one of this category's subcategories.
    pub fn owns_subcategory(&self, id: &str) -> bool {
        self.subcategories.iter().any(|sub| sub.id == id)
    }

    /// Order value for the next subcategory appended to this category.
    pub fn next_subcategory_order(&self) -> i64 {
        self.subcategories
            .iter()
            .map(|sub| sub.order)
            .max()
            .unwrap_or(-1)
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, PromptKind, PromptTemplates, Subcategory};

    fn templates() -> PromptTemplates {
        PromptTemplates {
            evaluation: "eval {{CONTEXT}}".to_string(),
            planning: "plan {{CONTEXT}}".to_string(),
            synthesis: "synth {{CONTEXT}}".to_string(),
        }
    }

    #[test]
    fn prompt_kind_parses_case_insensitively() {
        assert_eq!(" Planning ".parse::<PromptKind>(), Ok(PromptKind::Planning));
        let err = "review".parse::<PromptKind>().unwrap_err();
        assert!(err.to_string().contains("review"));
    }

    #[test]
    fn templates_select_by_kind() {
        let templates = templates();
        assert_eq!(templates.get(PromptKind::Evaluation), "eval {{CONTEXT}}");
        assert_eq!(templates.get(PromptKind::Synthesis), "synth {{CONTEXT}}");
    }

    #[test]
    fn next_subcategory_order_starts_at_zero_and_follows_max() {
        let mut category = Category {
            id: "c1".to_string(),
            name: "Health".to_string(),
            icon: "❤️".to_string(),
            order: 0,
            subcategories: Vec::new(),
        };
        assert_eq!(category.next_subcategory_order(), 0);

        category.subcategories.push(Subcategory {
            id: "s1".to_string(),
            name: "Sleep".to_string(),
            category_id: "c1".to_string(),
            order: 4,
            prompt_templates: templates(),
        });
        assert_eq!(category.next_subcategory_order(), 5);
        assert!(category.owns_subcategory("s1"));
        assert!(category.subcategory("s2").is_none());
    }
}

//! First-launch taxonomy and settings.
//!
//! Every call generates fresh ids, so two default states never share ids.
//! Evaluation and planning templates are hand-written per subcategory; the
//! synthesis slot always holds [`UNIVERSAL_SYNTHESIS_PROMPT`].

use crate::model::category::{Category, PromptTemplates, Subcategory};
use crate::model::new_id;
use crate::model::settings::Settings;
use crate::model::state::AppState;
use crate::prompt::templates::UNIVERSAL_SYNTHESIS_PROMPT;

struct DefaultCategory {
    name: &'static str,
    icon: &'static str,
    subcategories: &'static [DefaultSubcategory],
}

struct DefaultSubcategory {
    name: &'static str,
    evaluation: &'static str,
    planning: &'static str,
}

const DEFAULT_TAXONOMY: &[DefaultCategory] = &[
    DefaultCategory {
        name: "Health",
        icon: "❤️",
        subcategories: &[
            DefaultSubcategory {
                name: "Exercise",
                evaluation: include_str!("default_prompts/exercise_evaluation.txt"),
                planning: include_str!("default_prompts/exercise_planning.txt"),
            },
            DefaultSubcategory {
                name: "Nutrition",
                evaluation: include_str!("default_prompts/nutrition_evaluation.txt"),
                planning: include_str!("default_prompts/nutrition_planning.txt"),
            },
            DefaultSubcategory {
                name: "Sleep",
                evaluation: include_str!("default_prompts/sleep_evaluation.txt"),
                planning: include_str!("default_prompts/sleep_planning.txt"),
            },
            DefaultSubcategory {
                name: "Mental Health",
                evaluation: include_str!("default_prompts/mental_health_evaluation.txt"),
                planning: include_str!("default_prompts/mental_health_planning.txt"),
            },
        ],
    },
    DefaultCategory {
        name: "Finance",
        icon: "💰",
        subcategories: &[
            DefaultSubcategory {
                name: "Budget & Spending",
                evaluation: include_str!("default_prompts/budget_spending_evaluation.txt"),
                planning: include_str!("default_prompts/budget_spending_planning.txt"),
            },
            DefaultSubcategory {
                name: "Savings & Investments",
                evaluation: include_str!("default_prompts/savings_investments_evaluation.txt"),
                planning: include_str!("default_prompts/savings_investments_planning.txt"),
            },
            DefaultSubcategory {
                name: "Debt",
                evaluation: include_str!("default_prompts/debt_evaluation.txt"),
                planning: include_str!("default_prompts/debt_planning.txt"),
            },
            DefaultSubcategory {
                name: "Income & Career",
                evaluation: include_str!("default_prompts/income_career_evaluation.txt"),
                planning: include_str!("default_prompts/income_career_planning.txt"),
            },
        ],
    },
    DefaultCategory {
        name: "Personal Growth",
        icon: "✨",
        subcategories: &[
            DefaultSubcategory {
                name: "Reading & Learning",
                evaluation: include_str!("default_prompts/reading_learning_evaluation.txt"),
                planning: include_str!("default_prompts/reading_learning_planning.txt"),
            },
            DefaultSubcategory {
                name: "Goals & Habits",
                evaluation: include_str!("default_prompts/goals_habits_evaluation.txt"),
                planning: include_str!("default_prompts/goals_habits_planning.txt"),
            },
            DefaultSubcategory {
                name: "Relationships",
                evaluation: include_str!("default_prompts/relationships_evaluation.txt"),
                planning: include_str!("default_prompts/relationships_planning.txt"),
            },
            DefaultSubcategory {
                name: "Projects & Hobbies",
                evaluation: include_str!("default_prompts/projects_hobbies_evaluation.txt"),
                planning: include_str!("default_prompts/projects_hobbies_planning.txt"),
            },
        ],
    },
];

/// Builds the default categories with linked subcategories.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_TAXONOMY
        .iter()
        .zip(0_i64..)
        .map(|(default, order)| {
            let category_id = new_id();
            let subcategories = default
                .subcategories
                .iter()
                .zip(0_i64..)
                .map(|(sub, sub_order)| Subcategory {
                    id: new_id(),
                    name: sub.name.to_string(),
                    category_id: category_id.clone(),
                    order: sub_order,
                    prompt_templates: PromptTemplates {
                        evaluation: sub.evaluation.to_string(),
                        planning: sub.planning.to_string(),
                        synthesis: UNIVERSAL_SYNTHESIS_PROMPT.to_string(),
                    },
                })
                .collect();

            Category {
                id: category_id,
                name: default.name.to_string(),
                icon: default.icon.to_string(),
                order,
                subcategories,
            }
        })
        .collect()
}

/// Default state: default taxonomy, no entries, default settings.
pub fn default_state() -> AppState {
    AppState::new(default_categories(), Vec::new(), Settings::default())
}

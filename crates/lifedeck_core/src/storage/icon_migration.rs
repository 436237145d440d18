//! One-time rewrite of legacy icon names to emoji literals.
//!
//! Applied on load only. New code paths always store emoji.

use crate::model::state::AppState;

const ICON_MIGRATIONS: &[(&str, &str)] = &[
    ("Heart", "❤️"),
    ("DollarSign", "💰"),
    ("Sparkles", "✨"),
    ("Folder", "📁"),
    ("Briefcase", "💼"),
    ("Target", "🎯"),
    ("Activity", "🏃"),
    ("Book", "📚"),
    ("Palette", "🎨"),
    ("Home", "🏠"),
    ("Plane", "✈️"),
    ("Music", "🎵"),
    ("Laptop", "💻"),
    ("Sprout", "🌱"),
];

/// Emoji replacement for a legacy icon name, if `icon` is one.
pub fn migrated_icon(icon: &str) -> Option<&'static str> {
    ICON_MIGRATIONS
        .iter()
        .find(|(legacy, _)| *legacy == icon)
        .map(|(_, emoji)| *emoji)
}

/// Rewrites legacy category icons in place.
///
/// Returns the number of categories that changed.
pub fn migrate_icons(state: &mut AppState) -> usize {
    let mut rewritten = 0;
    for category in &mut state.categories {
        if let Some(emoji) = migrated_icon(&category.icon) {
            category.icon = emoji.to_string();
            rewritten += 1;
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::{migrate_icons, migrated_icon};
    use crate::model::category::Category;
    use crate::model::state::AppState;

    fn category(icon: &str) -> Category {
        Category {
            id: icon.to_string(),
            name: icon.to_string(),
            icon: icon.to_string(),
            order: 0,
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn known_names_map_to_emoji() {
        assert_eq!(migrated_icon("DollarSign"), Some("💰"));
        assert_eq!(migrated_icon("Sprout"), Some("🌱"));
        assert_eq!(migrated_icon("💰"), None);
        assert_eq!(migrated_icon("heart"), None);
    }

    #[test]
    fn migration_is_idempotent() {
        let mut state = AppState::default();
        state.categories = vec![category("Heart"), category("🎯"), category("Plane")];

        assert_eq!(migrate_icons(&mut state), 2);
        assert_eq!(state.categories[0].icon, "❤️");
        assert_eq!(state.categories[2].icon, "✈️");
        assert_eq!(migrate_icons(&mut state), 0);
    }
}

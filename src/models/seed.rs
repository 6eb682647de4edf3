//! Built-in groups used when nothing has been saved yet

use once_cell::sync::Lazy;

use super::group::{Category, Color, GroupForm, GroupRecord};

static DEFAULT_GROUPS: Lazy<Vec<GroupRecord>> = Lazy::new(|| {
    let group = |id: i64, name: &str, category: Category, notes: &str, color: Color| {
        GroupRecord::new(
            id,
            GroupForm::new(name, category).with_notes(notes).with_color(color),
        )
    };

    vec![
        group(
            1,
            "Managerial Accounting",
            Category::Classes,
            "Practice Q3 from Chapter 4.",
            Color::Blue,
        )
        .pinned(),
        group(
            2,
            "Project: Accounting",
            Category::Projects,
            "Financial analysis due Friday.",
            Color::Blue,
        ),
        group(
            3,
            "Business Research Methods",
            Category::Classes,
            "Read methodology section.",
            Color::Purple,
        ),
        group(
            4,
            "Project: Research",
            Category::Projects,
            "Survey questionnaire draft.",
            Color::Purple,
        )
        .pinned(),
        group(
            5,
            "Marketing Management",
            Category::Classes,
            "Case study discussion tomorrow.",
            Color::Emerald,
        )
        .pinned(),
        group(
            6,
            "Project: Marketing",
            Category::Projects,
            "Competitor analysis slides.",
            Color::Emerald,
        ),
        group(
            7,
            "Mgmt & Org Behaviour",
            Category::Classes,
            "Submit assignment 2.",
            Color::Amber,
        ),
        group(
            8,
            "Project: OB",
            Category::Projects,
            "Roleplay script preparation.",
            Color::Amber,
        ),
        group(
            9,
            "Statistics",
            Category::Classes,
            "Bring calculator for test.",
            Color::Blue,
        )
        .pinned(),
        group(
            10,
            "Project: Statistics",
            Category::Projects,
            "Data cleaning complete.",
            Color::Blue,
        ),
        group(
            11,
            "Economics for Managers",
            Category::Classes,
            "Demand/Supply curves recap.",
            Color::Emerald,
        ),
        group(
            12,
            "Project: Economics",
            Category::Projects,
            "Market trend report.",
            Color::Emerald,
        ),
        group(
            13,
            "Yoga Class",
            Category::Classes,
            "Bring mat. Morning session.",
            Color::Amber,
        ),
        group(
            14,
            "Project: Wellness/Yoga",
            Category::Projects,
            "Health journal submission.",
            Color::Amber,
        ),
        group(
            15,
            "IT Skills for Managers",
            Category::Classes,
            "Excel formulas test.",
            Color::Purple,
        ),
        group(
            16,
            "Project: IT Skills",
            Category::Projects,
            "Database implementation.",
            Color::Purple,
        ),
        group(
            99,
            "Section B - Lunch Gang",
            Category::Social,
            "Canteen at 1 PM?",
            Color::Rose,
        ),
    ]
});

/// A fresh copy of the default group set.
pub fn default_groups() -> Vec<GroupRecord> {
    DEFAULT_GROUPS.clone()
}

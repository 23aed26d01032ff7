use crate::school::{Meal, SchoolLevel};

pub const LUNCH_DISCLAIMER: &str = "\
A full student lunch includes a choice of one (1) entrée supplying protein and grain, \
two (2) vegetable side dishes, one (1) fruit side dish, and one (1) milk. \
Milk choices include skim white, 1% white and skim chocolate. In order to qualify as a \
reimbursable meal, students must choose a minimum of three (3) components and the meal \
must contain ½ cup of fruit or vegetable.";

pub const BREAKFAST_DISCLAIMER: &str = "\
All students must select at least 1/2 cup of fruit with their reimbursable meal. \
A full student breakfast includes a choice of one (1) entrée supplying protein \
and/or grain, up to two (2) fruit side dishes (one (1) can be a fruit juice, \
and one (1) milk. Milk choices include skim white, 1% white, and skim chocolate";

/// Upper-case needles; any menu item whose name contains one is dropped.
pub const EXCLUDED_ITEMS: &[&str] = &[
    "MAYONNAISE",
    "KETCHUP",
    "MUSTARD",
    "RANCH DRESSING",
    "BARBECUE SAUCE",
    "HOT SAUCE",
    "PACKET",
    "SYRUP",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
];

const ELEMENTARY_LUNCH_BLOCKED: &[&str] = &["CONDIMENT", "MILK", "A LA CARTE", "SNACK"];
const MIDDLE_LUNCH_BLOCKED: &[&str] = &["CONDIMENT", "MILK", "SNACK"];
const HIGH_LUNCH_BLOCKED: &[&str] = &["CONDIMENT", "MILK"];
const BREAKFAST_BLOCKED: &[&str] = &["CONDIMENT", "MILK", "A LA CARTE"];

pub const DEFAULT_STATION: &str = "MENU";

pub const ELEMENTARY_LUNCH_SLUG: &str = "ashley-magnet";
pub const MIDDLE_LUNCH_SLUG: &str = "hanes-magnet";

pub fn blocked_stations(level: SchoolLevel, meal: Meal) -> &'static [&'static str] {
    match (meal, level) {
        (Meal::Breakfast, _) => BREAKFAST_BLOCKED,
        (Meal::Lunch, SchoolLevel::Elementary) => ELEMENTARY_LUNCH_BLOCKED,
        (Meal::Lunch, SchoolLevel::Middle) => MIDDLE_LUNCH_BLOCKED,
        (Meal::Lunch, SchoolLevel::High) => HIGH_LUNCH_BLOCKED,
    }
}

/// School whose breakfast menu stands in for every school of that level.
pub fn representative_breakfast(level: SchoolLevel) -> &'static str {
    match level {
        SchoolLevel::Elementary => "ashley-magnet",
        SchoolLevel::Middle => "clemmons-middle",
        SchoolLevel::High => "east-forsyth",
    }
}

pub fn disclaimer(meal: Meal) -> &'static str {
    match meal {
        Meal::Lunch => LUNCH_DISCLAIMER,
        Meal::Breakfast => BREAKFAST_DISCLAIMER,
    }
}

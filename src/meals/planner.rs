use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use time::{Date, Month, OffsetDateTime, UtcOffset, Weekday};

use crate::meals::store::MealMap;
use crate::meals::types::{Meal, MealType};

/// Upper bound on the number of day columns in the planning grid.
pub const MAX_COLUMNS: usize = 14;

/// One rendered day column: the civil date plus its display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    /// Stable `YYYY-MM-DD` key for the column.
    pub key: Date,
    pub weekday: String,
    #[serde(rename = "monthDay")]
    pub month_day: String,
    pub a11y: String,
    #[serde(rename = "isToday")]
    pub is_today: bool,
}

/// "Today" as a civil date in the viewer's local offset, falling back to UTC
/// when the platform cannot determine the local offset.
pub fn local_today() -> Date {
    match UtcOffset::current_local_offset() {
        Ok(offset) => OffsetDateTime::now_utc().to_offset(offset).date(),
        Err(_) => OffsetDateTime::now_utc().date(),
    }
}

/// Distinct dates on or after `today` present in `meals`, ascending, capped
/// at [`MAX_COLUMNS`]. Dates strictly before `today` drop out entirely.
pub fn plan_columns(meals: &MealMap, today: Date) -> Vec<DayColumn> {
    let dates: BTreeSet<Date> = meals
        .values()
        .map(|m| m.date)
        .filter(|d| *d >= today)
        .collect();

    dates
        .into_iter()
        .take(MAX_COLUMNS)
        .map(|date| day_column(date, today))
        .collect()
}

fn day_column(date: Date, today: Date) -> DayColumn {
    let weekday = short_weekday(date.weekday());
    let month = short_month(date.month());
    DayColumn {
        key: date,
        weekday: weekday.to_string(),
        month_day: format!("{month} {}", date.day()),
        a11y: format!(
            "{}, {month} {}, {}",
            long_weekday(date.weekday()),
            date.day(),
            date.year()
        ),
        is_today: date == today,
    }
}

/// Derived view of the whole planning grid: day columns plus an index from
/// `(date, meal type)` to the meal occupying that cell.
///
/// The index is built over the full collection with no uniqueness
/// enforcement; when two meals share a date and type, one of them wins. A
/// `(date, type)` pair with no meal is still a valid cell, it just resolves
/// to `None` — the grid always has `3 x columns` cells.
#[derive(Debug)]
pub struct PlanGrid<'a> {
    pub columns: Vec<DayColumn>,
    index: HashMap<(Date, MealType), &'a Meal>,
}

impl<'a> PlanGrid<'a> {
    pub fn build(meals: &'a MealMap, today: Date) -> Self {
        let columns = plan_columns(meals, today);
        let mut index = HashMap::with_capacity(meals.len());
        for meal in meals.values() {
            index.insert((meal.date, meal.meal_type), meal);
        }
        Self { columns, index }
    }

    pub fn cell(&self, date: Date, meal_type: MealType) -> Option<&'a Meal> {
        self.index.get(&(date, meal_type)).copied()
    }
}

fn short_weekday(w: Weekday) -> &'static str {
    match w {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn long_weekday(w: Weekday) -> &'static str {
    match w {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

fn short_month(m: Month) -> &'static str {
    match m {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod planner_tests {
    use super::*;
    use crate::meals::types::Macros;
    use time::macros::date;
    use time::Duration;

    fn meal(id: &str, date: Date, meal_type: MealType) -> Meal {
        Meal {
            id: id.to_string(),
            date,
            meal_type,
            name: format!("Meal {id}"),
            description: String::new(),
            servings: 1,
            selected: false,
            ingredients: vec![],
            macros: Macros::default(),
        }
    }

    fn map(meals: Vec<Meal>) -> MealMap {
        meals.into_iter().map(|m| (m.id.clone(), m)).collect()
    }

    #[test]
    fn caps_twenty_future_dates_at_fourteen_columns() {
        let today = date!(2026 - 09 - 01);
        let meals = map((0..20)
            .map(|i| meal(&format!("m{i}"), today + Duration::days(i), MealType::Lunch))
            .collect());
        let columns = plan_columns(&meals, today);
        assert_eq!(columns.len(), MAX_COLUMNS);
        assert_eq!(columns[0].key, today);
        for pair in columns.windows(2) {
            assert!(pair[0].key < pair[1].key);
        }
    }

    #[test]
    fn today_included_and_flagged_yesterday_excluded() {
        let today = date!(2026 - 09 - 01);
        let meals = map(vec![
            meal("today", today, MealType::Breakfast),
            meal("yesterday", today - Duration::days(1), MealType::Breakfast),
        ]);
        let columns = plan_columns(&meals, today);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].key, today);
        assert!(columns[0].is_today);
    }

    #[test]
    fn single_breakfast_yields_one_column_and_empty_lunch_cell() {
        let today = date!(2026 - 09 - 01);
        let meals = map(vec![meal("a", today, MealType::Breakfast)]);
        let grid = PlanGrid::build(&meals, today);
        assert_eq!(grid.columns.len(), 1);
        assert_eq!(grid.cell(today, MealType::Breakfast).map(|m| m.id.as_str()), Some("a"));
        assert!(grid.cell(today, MealType::Lunch).is_none());
        assert!(grid.cell(today, MealType::Dinner).is_none());
    }

    #[test]
    fn duplicate_date_and_type_resolves_to_a_single_meal() {
        let today = date!(2026 - 09 - 01);
        let meals = map(vec![
            meal("a", today, MealType::Dinner),
            meal("b", today, MealType::Dinner),
        ]);
        let grid = PlanGrid::build(&meals, today);
        let winner = grid.cell(today, MealType::Dinner).expect("cell occupied");
        assert!(winner.id == "a" || winner.id == "b");
    }

    #[test]
    fn columns_skip_gaps_but_stay_sorted() {
        let today = date!(2026 - 09 - 01);
        let meals = map(vec![
            meal("far", today + Duration::days(10), MealType::Lunch),
            meal("near", today + Duration::days(2), MealType::Lunch),
        ]);
        let columns = plan_columns(&meals, today);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].key, today + Duration::days(2));
        assert_eq!(columns[1].key, today + Duration::days(10));
        assert!(!columns[0].is_today);
    }

    #[test]
    fn labels_match_civil_date() {
        // 2026-09-01 is a Tuesday.
        let today = date!(2026 - 09 - 01);
        let columns = plan_columns(&map(vec![meal("a", today, MealType::Lunch)]), today);
        assert_eq!(columns[0].weekday, "Tue");
        assert_eq!(columns[0].month_day, "Sep 1");
        assert_eq!(columns[0].a11y, "Tuesday, Sep 1, 2026");
    }
}

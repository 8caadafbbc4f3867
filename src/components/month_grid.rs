use chrono::{Datelike, NaiveDate};

use crate::core::date::{date_key, month_matrix, start_of_month};
use crate::core::registry::PlantRegistry;

/// At most this many plant dots render per day; the rest collapse to "+n".
const MAX_DOTS: usize = 5;

/// Which month the calendar shows. Navigation mirrors the month header
/// controls: previous, next, and jump back to today.
#[derive(Debug, Clone)]
pub struct MonthGridState {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
}

impl Default for MonthGridState {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            displayed_month: start_of_month(today),
        }
    }
}

impl MonthGridState {
    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    pub fn go_today(&mut self, today: NaiveDate) {
        self.displayed_month = start_of_month(today);
    }
}

/// One plant with a mark on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantMark {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A concrete day cell in the grid.
#[derive(Debug, Clone)]
pub struct DaySlot {
    pub date: NaiveDate,
    pub key: String,
    pub is_today: bool,
    /// The selected plant has a mark on this day.
    pub has_selected: bool,
    /// Every plant with a mark on this day, in registry order.
    pub marks: Vec<PlantMark>,
}

/// Week-aligned view model for one month. Pure function of the displayed
/// month, the registry, and the selection; recomputed on every change.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub weeks: Vec<[Option<DaySlot>; 7]>,
}

pub fn month_grid(state: &MonthGridState, registry: &PlantRegistry, today: NaiveDate) -> MonthGrid {
    let selected_id = registry.selected_id();
    let weeks = month_matrix(state.displayed_month)
        .into_iter()
        .map(|week| {
            week.map(|slot| {
                slot.map(|date| {
                    let key = date_key(date);
                    let marks: Vec<PlantMark> = registry
                        .plants()
                        .iter()
                        .filter(|p| p.has_date(&key))
                        .map(|p| PlantMark {
                            id: p.id.clone(),
                            name: p.name.clone(),
                            color: p.color.clone(),
                        })
                        .collect();
                    let has_selected = selected_id
                        .and_then(|id| registry.plant(id))
                        .is_some_and(|p| p.has_date(&key));
                    DaySlot {
                        date,
                        key,
                        is_today: date == today,
                        has_selected,
                        marks,
                    }
                })
            })
        })
        .collect();

    MonthGrid {
        month: state.displayed_month,
        weeks,
    }
}

/// Render the grid for the terminal. Today is bracketed, a `*` marks days
/// the selected plant has set, a `·` marks days only other plants have set.
pub fn render(grid: &MonthGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("      {}\n", grid.month.format("%B %Y")));
    out.push_str(" Mon   Tue   Wed   Thu   Fri   Sat   Sun\n");

    for week in &grid.weeks {
        let mut line = String::new();
        for slot in week {
            match slot {
                None => line.push_str("      "),
                Some(day) => {
                    let mark = if day.has_selected {
                        '*'
                    } else if !day.marks.is_empty() {
                        '·'
                    } else {
                        ' '
                    };
                    let cell = if day.is_today {
                        format!("[{:>2}{}]", day.date.day(), mark)
                    } else {
                        format!(" {:>2}{} ", day.date.day(), mark)
                    };
                    line.push_str(&format!("{:<6}", cell));
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let marked = marked_day_lines(grid);
    if !marked.is_empty() {
        out.push('\n');
        for line in marked {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

/// One line per day carrying marks, plant names capped at `MAX_DOTS` with
/// a "+n" tail (the original grid shows up to five color dots per cell).
fn marked_day_lines(grid: &MonthGrid) -> Vec<String> {
    let mut lines = Vec::new();
    for slot in grid.weeks.iter().flatten().flatten() {
        if slot.marks.is_empty() {
            continue;
        }
        let mut names: Vec<&str> = slot
            .marks
            .iter()
            .take(MAX_DOTS)
            .map(|m| m.name.as_str())
            .collect();
        let overflow = slot.marks.len().saturating_sub(MAX_DOTS);
        let tail;
        if overflow > 0 {
            tail = format!("+{}", overflow);
            names.push(&tail);
        }
        lines.push(format!("  {}: {}", slot.key, names.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn state_for(month: NaiveDate) -> MonthGridState {
        MonthGridState {
            displayed_month: month,
        }
    }

    #[test]
    fn navigation_moves_by_whole_months() {
        let mut state = state_for(d(2024, 3, 1));
        state.next_month();
        assert_eq!(state.displayed_month, d(2024, 4, 1));
        state.prev_month();
        state.prev_month();
        assert_eq!(state.displayed_month, d(2024, 2, 1));
        state.go_today(d(2024, 9, 17));
        assert_eq!(state.displayed_month, d(2024, 9, 1));
    }

    #[test]
    fn grid_flags_marks_and_today() {
        let mut registry = PlantRegistry::default();
        let basil = registry.add_plant("Basil", "#34d399").unwrap().id.clone();
        let fern = registry.add_plant("Fern", "#10b981").unwrap().id.clone();
        registry.toggle_day(&basil, "2024-03-15");
        registry.toggle_day(&fern, "2024-03-15");
        registry.toggle_day(&fern, "2024-03-20");

        // fern is selected (added last)
        let grid = month_grid(&state_for(d(2024, 3, 1)), &registry, d(2024, 3, 20));

        let slot = |day: u32| {
            grid.weeks
                .iter()
                .flatten()
                .flatten()
                .find(|s| s.date == d(2024, 3, day))
                .unwrap()
                .clone()
        };

        let fifteenth = slot(15);
        assert_eq!(fifteenth.marks.len(), 2);
        assert!(fifteenth.has_selected);
        assert!(!fifteenth.is_today);

        let twentieth = slot(20);
        assert_eq!(twentieth.marks.len(), 1);
        assert_eq!(twentieth.marks[0].id, fern);
        assert!(twentieth.is_today);

        let first = slot(1);
        assert!(first.marks.is_empty());
        assert!(!first.has_selected);
    }

    #[test]
    fn no_selection_means_no_selected_flags() {
        let mut registry = PlantRegistry::default();
        let basil = registry.add_plant("Basil", "#34d399").unwrap().id.clone();
        registry.toggle_day(&basil, "2024-03-15");
        registry.select_plant(&basil); // clears: basil was selected by add

        let grid = month_grid(&state_for(d(2024, 3, 1)), &registry, d(2024, 3, 1));
        assert!(grid.weeks.iter().flatten().flatten().all(|s| !s.has_selected));
    }

    #[test]
    fn marked_lines_cap_at_five_names() {
        let mut registry = PlantRegistry::default();
        for i in 0..7 {
            let id = registry
                .add_plant(&format!("Plant {i}"), "#34d399")
                .unwrap()
                .id
                .clone();
            registry.toggle_day(&id, "2024-03-15");
        }

        let grid = month_grid(&state_for(d(2024, 3, 1)), &registry, d(2024, 3, 1));
        let lines = marked_day_lines(&grid);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  2024-03-15: "));
        assert!(lines[0].ends_with("+2"));
        assert_eq!(lines[0].matches(", ").count(), 5);
    }

    #[test]
    fn render_brackets_today() {
        let mut registry = PlantRegistry::default();
        registry.add_plant("Basil", "#34d399");
        let grid = month_grid(&state_for(d(2024, 3, 1)), &registry, d(2024, 3, 7));
        let text = render(&grid);
        assert!(text.contains("March 2024"));
        assert!(text.contains("[ 7 ]"));
    }
}

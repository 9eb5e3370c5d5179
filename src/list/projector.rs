//! Filter/Sort Projector
//!
//! Pure mapping from (collection, filter state) to the displayed rows.
//! Runs on every keystroke, so it never touches the network.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Projectable;

/// Label of the sentinel option that disables the status filter
pub const ALL_LABEL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Parse a dropdown value; the "All" sentinel (or empty) disables filtering
    pub fn from_choice(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_LABEL) {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn as_choice(&self) -> &str {
        match self {
            StatusFilter::All => ALL_LABEL,
            StatusFilter::Only(value) => value,
        }
    }
}

/// Which field the exact-match filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Status,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Input order
    #[default]
    None,
    DateDesc,
    IdAsc,
    TitleAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::None, SortKey::DateDesc, SortKey::IdAsc, SortKey::TitleAsc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::DateDesc => "newest",
            SortKey::IdAsc => "id",
            SortKey::TitleAsc => "title",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::DateDesc => "Newest first",
            SortKey::IdAsc => "ID",
            SortKey::TitleAsc => "Name A-Z",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL.into_iter().find(|k| k.as_str() == value).unwrap_or_default()
    }
}

/// View-owned filter selection, reset on navigation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub field: FilterField,
    pub sort_key: SortKey,
}

impl FilterState {
    pub fn on_category() -> Self {
        Self { field: FilterField::Category, ..Default::default() }
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }
}

/// Search AND exact filter
pub fn matches<T: Projectable>(item: &T, state: &FilterState) -> bool {
    let needle = state.search_text.trim().to_lowercase();
    matches_search(item, &needle) && matches_filter(item, state)
}

fn matches_search<T: Projectable>(item: &T, needle: &str) -> bool {
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

fn matches_filter<T: Projectable>(item: &T, state: &FilterState) -> bool {
    match &state.status_filter {
        StatusFilter::All => true,
        StatusFilter::Only(wanted) => {
            let value = match state.field {
                FilterField::Status => item.status(),
                FilterField::Category => item.category(),
            };
            value.eq_ignore_ascii_case(wanted)
        }
    }
}

/// Filtered and sorted copy of `items`; equal elements keep input order
pub fn project<T: Projectable>(items: &[T], state: &FilterState) -> Vec<T> {
    let needle = state.search_text.trim().to_lowercase();
    let mut out: Vec<T> = items
        .iter()
        .filter(|item| matches_search(*item, &needle) && matches_filter(*item, state))
        .cloned()
        .collect();

    match state.sort_key {
        SortKey::None => {}
        SortKey::DateDesc => out.sort_by_cached_key(|item| {
            let key = item.date().and_then(parse_timestamp);
            (key.is_none(), Reverse(key))
        }),
        SortKey::IdAsc => out.sort_by_key(|item| item.id()),
        SortKey::TitleAsc => out.sort_by_cached_key(|item| item.title().to_lowercase()),
    }
    out
}

/// Backend timestamps as UTC instants. Accepts RFC 3339 with any offset,
/// naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` taken as UTC, or a bare date.
/// Anything else sorts with the undated rows.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
}

/// Dropdown options: the sentinel followed by distinct values in first-seen order
pub fn status_options<T: Projectable>(items: &[T], field: FilterField) -> Vec<String> {
    let mut options = vec![ALL_LABEL.to_string()];
    for item in items {
        let value = match field {
            FilterField::Status => item.status(),
            FilterField::Category => item.category(),
        };
        if !value.is_empty() && !options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
            options.push(value.to_string());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{Id, Record};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Id,
        name: &'static str,
        status: &'static str,
        category: &'static str,
        date: Option<&'static str>,
        related: Vec<&'static str>,
    }

    impl Record for Row {
        fn id(&self) -> Id {
            self.id
        }
    }

    impl Projectable for Row {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.to_string(), self.id.to_string(), self.related.join(" ")]
        }
        fn status(&self) -> &str {
            self.status
        }
        fn category(&self) -> &str {
            self.category
        }
        fn date(&self) -> Option<&str> {
            self.date
        }
        fn title(&self) -> &str {
            self.name
        }
    }

    fn row(id: Id, name: &'static str, status: &'static str) -> Row {
        Row { id, name, status, category: "", date: None, related: vec![] }
    }

    fn ids(rows: &[Row]) -> Vec<Id> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_status_filter_exact_match() {
        let rows = vec![row(1, "a", "pending"), row(2, "b", "shipped")];
        let state = FilterState {
            status_filter: StatusFilter::Only("shipped".into()),
            ..Default::default()
        };
        assert_eq!(project(&rows, &state), vec![row(2, "b", "shipped")]);
    }

    #[test]
    fn test_all_sentinel_disables_filter() {
        let rows = vec![row(1, "a", "pending"), row(2, "b", "shipped")];
        let state = FilterState { status_filter: StatusFilter::from_choice("All"), ..Default::default() };
        assert_eq!(ids(&project(&rows, &state)), vec![1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let mut yoga = row(7, "Morning Yoga", "published");
        yoga.related = vec!["Mat", "Strap"];
        let rows = vec![yoga, row(12, "HIIT Blast", "draft")];

        let search = |text: &str| {
            let state = FilterState { search_text: text.into(), ..Default::default() };
            ids(&project(&rows, &state))
        };

        assert_eq!(search("  YOGA "), vec![7]);
        assert_eq!(search("12"), vec![12]);
        assert_eq!(search("strap"), vec![7]);
        assert_eq!(search("zumba"), Vec::<Id>::new());
        assert_eq!(search(""), vec![7, 12]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let rows = vec![
            row(1, "Yoga basics", "published"),
            row(2, "Yoga advanced", "draft"),
            row(3, "Boxing", "published"),
        ];
        let state = FilterState {
            search_text: "yoga".into(),
            status_filter: StatusFilter::Only("Published".into()),
            ..Default::default()
        };
        assert_eq!(ids(&project(&rows, &state)), vec![1]);
    }

    #[test]
    fn test_category_field() {
        let mut a = row(1, "a", "published");
        a.category = "Strength";
        let mut b = row(2, "b", "published");
        b.category = "Cardio";
        let state = FilterState {
            status_filter: StatusFilter::Only("cardio".into()),
            ..FilterState::on_category()
        };
        assert_eq!(ids(&project(&[a, b], &state)), vec![2]);
    }

    #[test]
    fn test_date_desc_is_stable_and_undated_last() {
        let mut rows = vec![row(1, "a", "x"), row(2, "b", "x"), row(3, "c", "x"), row(4, "d", "x")];
        rows[0].date = Some("2024-01-01T10:00:00Z");
        rows[1].date = None;
        rows[2].date = Some("2024-03-01T10:00:00Z");
        rows[3].date = Some("2024-01-01T10:00:00Z");

        let state = FilterState::default().with_sort(SortKey::DateDesc);
        assert_eq!(ids(&project(&rows, &state)), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_date_desc_compares_instants_not_text() {
        let mut rows = vec![row(1, "a", "x"), row(2, "b", "x"), row(3, "c", "x"), row(4, "d", "x"), row(5, "e", "x")];
        // 09:00 at +02:00 is 07:00Z, earlier than row 2
        rows[0].date = Some("2024-05-01T09:00:00+02:00");
        rows[1].date = Some("2024-05-01T08:00:00Z");
        // fractional seconds sort after the whole second
        rows[2].date = Some("2024-05-01T08:00:00.500Z");
        rows[3].date = Some("2024-04-30");
        rows[4].date = Some("not a date");

        let state = FilterState::default().with_sort(SortKey::DateDesc);
        assert_eq!(ids(&project(&rows, &state)), vec![3, 2, 1, 4, 5]);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let z = parse_timestamp("2024-05-01T08:00:00Z");
        assert!(z.is_some());
        assert_eq!(parse_timestamp("2024-05-01T10:00:00+02:00"), z);
        assert_eq!(parse_timestamp("2024-05-01T08:00:00"), z);
        assert_eq!(parse_timestamp("2024-05-01 08:00:00"), z);
        assert!(parse_timestamp("2024-05-01").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_title_and_id_sort() {
        let rows = vec![row(3, "pilates", "x"), row(1, "Boxing", "x"), row(2, "cardio", "x")];
        assert_eq!(ids(&project(&rows, &FilterState::default().with_sort(SortKey::TitleAsc))), vec![1, 2, 3]);
        assert_eq!(ids(&project(&rows, &FilterState::default().with_sort(SortKey::IdAsc))), vec![1, 2, 3]);
        assert_eq!(ids(&project(&rows, &FilterState::default())), vec![3, 1, 2]);
    }

    #[test]
    fn test_title_ties_keep_input_order() {
        let rows = vec![row(5, "Same", "x"), row(2, "same", "x"), row(9, "SAME", "x")];
        let state = FilterState::default().with_sort(SortKey::TitleAsc);
        assert_eq!(ids(&project(&rows, &state)), vec![5, 2, 9]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let rows = vec![
            row(4, "Yoga flow", "published"),
            row(1, "Yoga core", "published"),
            row(2, "Spin", "published"),
            row(3, "Yoga nidra", "draft"),
        ];
        let state = FilterState {
            search_text: "yoga".into(),
            status_filter: StatusFilter::Only("published".into()),
            field: FilterField::Status,
            sort_key: SortKey::TitleAsc,
        };
        let once = project(&rows, &state);
        assert!(once.iter().all(|r| matches(r, &state)));
        assert_eq!(project(&once, &state), once);
    }

    #[test]
    fn test_status_options_distinct_in_order() {
        let rows = vec![row(1, "a", "pending"), row(2, "b", "shipped"), row(3, "c", "Pending")];
        assert_eq!(status_options(&rows, FilterField::Status), vec!["All", "pending", "shipped"]);
    }

    #[test]
    fn test_sort_key_round_trip_from_select_value() {
        assert_eq!(SortKey::from_value("newest"), SortKey::DateDesc);
        assert_eq!(SortKey::from_value("bogus"), SortKey::None);
    }
}

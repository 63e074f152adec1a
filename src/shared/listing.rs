//! In-memory filter, sort and paginate pipeline.
//!
//! Stages always run in the same order over a fully fetched collection:
//! text search, field filters, sort, then an offset-cursor window. The same
//! inputs over the same snapshot always produce the same page.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A single field value exposed to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(Cow<'a, str>),
    Bool(bool),
}

impl FieldValue<'_> {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

/// Entities that can be searched, filtered and sorted by field name
pub trait Listable {
    /// Value of `name`, or `None` when the field is absent on this record
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Case-insensitive substring match against any of `fields`
#[derive(Debug, Clone)]
pub struct SearchFilter {
    pub term: String,
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub enum FieldFilter {
    Equals { field: String, value: FilterValue },
    AtLeast { field: String, min: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<SearchFilter>,
    pub filters: Vec<FieldFilter>,
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    pub num_items: usize,
    pub cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            num_items: DEFAULT_PAGE_SIZE,
            cursor: None,
        }
    }
}

impl PageRequest {
    pub fn new(num_items: Option<usize>, cursor: Option<String>) -> Self {
        Self {
            num_items: num_items.unwrap_or(DEFAULT_PAGE_SIZE),
            cursor: cursor.filter(|c| !c.is_empty()),
        }
    }

    /// Clamped page size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> usize {
        self.num_items.clamp(1, MAX_PAGE_SIZE)
    }

    /// Start index encoded by the cursor; absent cursor starts at 0
    pub fn offset(&self) -> Result<usize> {
        match self.cursor.as_deref() {
            None => Ok(0),
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| AppError::BadRequest(format!("Invalid cursor: {}", cursor))),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: Vec<T>,
    pub is_done: bool,
    pub continue_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page.into_iter().map(f).collect(),
            is_done: self.is_done,
            continue_cursor: self.continue_cursor,
        }
    }
}

impl FilterValue {
    fn matches(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (FilterValue::Number(expected), FieldValue::Number(actual)) => expected == actual,
            (FilterValue::Text(expected), FieldValue::Text(actual)) => expected == actual.as_ref(),
            (FilterValue::Bool(expected), FieldValue::Bool(actual)) => expected == actual,
            _ => false,
        }
    }
}

impl FieldFilter {
    fn accepts<T: Listable>(&self, item: &T) -> bool {
        match self {
            FieldFilter::Equals { field, value } => {
                item.field(field).is_some_and(|v| value.matches(&v))
            }
            FieldFilter::AtLeast { field, min } => {
                matches!(item.field(field), Some(FieldValue::Number(n)) if n >= *min)
            }
        }
    }
}

impl SearchFilter {
    fn accepts<T: Listable>(&self, needle: &str, item: &T) -> bool {
        self.fields.iter().any(|name| {
            item.field(name)
                .is_some_and(|v| v.as_text().to_lowercase().contains(needle))
        })
    }
}

/// Numbers compare numerically, everything else as lowercase strings.
/// A missing value sorts before a present one.
fn compare_values(a: Option<&FieldValue<'_>>, b: Option<&FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => x.total_cmp(y),
        (Some(x), Some(y)) => x.as_text().to_lowercase().cmp(&y.as_text().to_lowercase()),
    }
}

/// Search, filter and sort `items`. The sort is stable.
pub fn select<T: Listable>(mut items: Vec<T>, query: &ListQuery) -> Vec<T> {
    if let Some(search) = &query.search {
        let needle = search.term.trim().to_lowercase();
        if !needle.is_empty() {
            items.retain(|item| search.accepts(&needle, item));
        }
    }

    for filter in &query.filters {
        items.retain(|item| filter.accepts(item));
    }

    if let Some(sort) = &query.sort {
        items.sort_by(|a, b| {
            let ordering = compare_values(a.field(&sort.field).as_ref(), b.field(&sort.field).as_ref());
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    items
}

/// Slice the window `[cursor, cursor + limit)` out of an already ordered collection
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Result<Page<T>> {
    let offset = request.offset()?;
    let total = items.len();

    if offset >= total {
        return Ok(Page {
            page: Vec::new(),
            is_done: true,
            continue_cursor: None,
        });
    }

    let end = (offset + request.limit()).min(total);
    let continue_cursor = (end < total).then(|| end.to_string());

    let page = items.into_iter().skip(offset).take(end - offset).collect();

    Ok(Page {
        page,
        is_done: continue_cursor.is_none(),
        continue_cursor,
    })
}

/// Full pipeline: select, then paginate
pub fn list<T: Listable>(items: Vec<T>, query: &ListQuery, request: &PageRequest) -> Result<Page<T>> {
    // Reject a bad cursor before doing any work
    request.offset()?;
    paginate(select(items, query), request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        name: String,
        score: Option<f64>,
        region: String,
        verified: bool,
    }

    impl Listable for Row {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => Some(FieldValue::Number(self.id as f64)),
                "name" => Some(FieldValue::Text(Cow::Borrowed(&self.name))),
                "score" => self.score.map(FieldValue::Number),
                "region" => Some(FieldValue::Text(Cow::Borrowed(&self.region))),
                "verified" => Some(FieldValue::Bool(self.verified)),
                _ => None,
            }
        }
    }

    fn row(id: usize, name: &str, score: Option<f64>) -> Row {
        Row {
            id,
            name: name.to_string(),
            score,
            region: if id % 2 == 0 { "r-even" } else { "r-odd" }.to_string(),
            verified: id % 3 == 0,
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| row(i, &format!("Person {}", i), Some(((i * 7) % 23) as f64))).collect()
    }

    fn by(field: &str, order: SortOrder) -> ListQuery {
        ListQuery {
            sort: Some(SortSpec {
                field: field.to_string(),
                order,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pages_of_ten_over_twenty_three_items() {
        let query = by("score", SortOrder::Desc);
        let items = rows(23);
        let highest = items
            .iter()
            .filter_map(|r| r.score)
            .fold(f64::MIN, f64::max);

        let first = list(items.clone(), &query, &PageRequest::new(Some(10), None)).unwrap();
        assert_eq!(first.page.len(), 10);
        assert_eq!(first.page[0].score, Some(highest));
        assert_eq!(first.continue_cursor.as_deref(), Some("10"));
        assert!(!first.is_done);

        let second = list(items.clone(), &query, &PageRequest::new(Some(10), first.continue_cursor)).unwrap();
        assert_eq!(second.page.len(), 10);

        let third = list(items, &query, &PageRequest::new(Some(10), second.continue_cursor)).unwrap();
        assert_eq!(third.page.len(), 3);
        assert!(third.is_done);
        assert!(third.continue_cursor.is_none());
    }

    #[test]
    fn test_concatenated_pages_reproduce_selection() {
        let items = rows(37);
        let query = ListQuery {
            filters: vec![FieldFilter::Equals {
                field: "region".to_string(),
                value: FilterValue::Text("r-odd".to_string()),
            }],
            sort: Some(SortSpec {
                field: "name".to_string(),
                order: SortOrder::Asc,
            }),
            ..Default::default()
        };
        let expected = select(items.clone(), &query);

        let mut collected = Vec::new();
        let mut cursor = None;
        loop {
            let page = list(items.clone(), &query, &PageRequest::new(Some(4), cursor)).unwrap();
            collected.extend(page.page);
            match page.continue_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        assert_eq!(collected, expected);
        assert_eq!(collected.len(), 18);
    }

    #[test]
    fn test_search_without_matches_returns_empty_page() {
        let query = ListQuery {
            search: Some(SearchFilter {
                term: "nobody".to_string(),
                fields: vec!["name"],
            }),
            ..Default::default()
        };

        let page = list(rows(5), &query, &PageRequest::default()).unwrap();

        assert!(page.page.is_empty());
        assert!(page.is_done);
        assert!(page.continue_cursor.is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let query = ListQuery {
            search: Some(SearchFilter {
                term: "  SON 1".to_string(),
                fields: vec!["name", "region"],
            }),
            ..Default::default()
        };

        let selected = select(rows(12), &query);

        let ids: Vec<usize> = selected.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 10, 11]);
    }

    #[test]
    fn test_blank_search_term_keeps_everything() {
        let query = ListQuery {
            search: Some(SearchFilter {
                term: "   ".to_string(),
                fields: vec!["name"],
            }),
            ..Default::default()
        };

        assert_eq!(select(rows(6), &query).len(), 6);
    }

    #[test]
    fn test_threshold_filter_skips_missing_values() {
        let items = vec![row(0, "a", Some(3.0)), row(1, "b", None), row(2, "c", Some(7.0))];
        let query = ListQuery {
            filters: vec![FieldFilter::AtLeast {
                field: "score".to_string(),
                min: 3.0,
            }],
            ..Default::default()
        };

        let ids: Vec<usize> = select(items, &query).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_bool_equality_filter() {
        let query = ListQuery {
            filters: vec![FieldFilter::Equals {
                field: "verified".to_string(),
                value: FilterValue::Bool(true),
            }],
            ..Default::default()
        };

        let ids: Vec<usize> = select(rows(7), &query).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 3, 6]);
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let items = vec![row(0, "a", Some(10.0)), row(1, "b", Some(9.0)), row(2, "c", Some(100.0))];

        let ids: Vec<usize> = select(items, &by("score", SortOrder::Asc)).iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let items = vec![row(0, "bravo", None), row(1, "Alpha", None), row(2, "charlie", None)];

        let ids: Vec<usize> = select(items, &by("name", SortOrder::Asc)).iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = vec![
            row(0, "x", Some(1.0)),
            row(1, "y", Some(2.0)),
            row(2, "z", Some(1.0)),
            row(3, "w", Some(2.0)),
        ];

        let asc: Vec<usize> = select(items.clone(), &by("score", SortOrder::Asc)).iter().map(|r| r.id).collect();
        let desc: Vec<usize> = select(items, &by("score", SortOrder::Desc)).iter().map(|r| r.id).collect();

        assert_eq!(asc, vec![0, 2, 1, 3]);
        assert_eq!(desc, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_missing_values_sort_first_ascending() {
        let items = vec![row(0, "a", Some(1.0)), row(1, "b", None)];

        let ids: Vec<usize> = select(items, &by("score", SortOrder::Asc)).iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 0]);
    }

    #[test]
    fn test_cursor_past_end_returns_empty_page() {
        let page = list(rows(5), &ListQuery::default(), &PageRequest::new(Some(10), Some("40".into()))).unwrap();

        assert!(page.page.is_empty());
        assert!(page.continue_cursor.is_none());
    }

    #[test]
    fn test_invalid_cursor_is_rejected() {
        let result = list(rows(5), &ListQuery::default(), &PageRequest::new(Some(10), Some("-1".into())));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(PageRequest::new(Some(0), None).limit(), 1);
        assert_eq!(PageRequest::new(Some(500), None).limit(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(None, None).limit(), DEFAULT_PAGE_SIZE);
    }
}

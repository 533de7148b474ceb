//! Search, filter and paginate for every management list.
//!
//! One generic implementation; each entity only names the fields a search term
//! is matched against through [`Searchable`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Types whose list screens support free-text search
pub trait Searchable {
    /// Fields the search term is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match across [`Searchable::search_fields`].
    /// An empty (or blank) term matches everything.
    fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Query-string parameters accepted by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListQuery {
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }
}

/// One visible window over a filtered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// True when `page` points past the last page of a non-empty list.
    /// The window is left empty in that case; callers decide whether to reset.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages && self.total_items > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Keep the items matching `term`, in their original order
pub fn filter_items<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches_search(term)).collect()
}

/// Cut the window for `page` (1-based) out of `items`
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let window = if start < total_items {
        let end = (start + page_size).min(total_items);
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: window,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Filter then paginate, the full list-screen pipeline
pub fn list_page<T: Searchable + Clone>(items: &[T], query: &ListQuery) -> Page<T> {
    let filtered: Vec<T> = filter_items(items, query.search_term())
        .into_iter()
        .cloned()
        .collect();
    paginate(&filtered, query.page(), query.page_size())
}

/// Search term and current page held by a list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub search: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Changing the term always returns to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, staying put on the last page
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            search: if self.search.is_empty() { None } else { Some(self.search.clone()) },
            page: Some(self.page),
            page_size: Some(self.page_size),
        }
    }

    pub fn view<T: Searchable + Clone>(&self, items: &[T]) -> Page<T> {
        list_page(items, &self.to_query())
    }
}

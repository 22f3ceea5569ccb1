//! Client-side search and pagination over an already fetched book list

use crate::models::book::Book;

/// Page sizes offered to the user
pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Books whose title or author contains `search`, ignoring case.
/// An empty search keeps everything.
pub fn filter_books<'a>(books: &'a [Book], search: &str) -> Vec<&'a Book> {
    if search.is_empty() {
        return books.iter().collect();
    }
    let needle = search.to_lowercase();
    books
        .iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1))
}

/// Items of 1-based `page`; empty when the page is past the end
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// One rendered page of a listing
#[derive(Debug, PartialEq, Eq)]
pub struct ListingPage<'a> {
    pub books: Vec<&'a Book>,
    /// Number of books matching the search, across all pages
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Search text plus current page. Changing the search or the page size
/// goes back to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    search: String,
    page: usize,
    per_page: usize,
}

impl Default for BookListing {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BookListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Only sizes from [`PAGE_SIZES`] are accepted; returns whether it changed
    pub fn set_per_page(&mut self, per_page: usize) -> bool {
        if !PAGE_SIZES.contains(&per_page) {
            return false;
        }
        self.per_page = per_page;
        self.page = 1;
        true
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn view<'a>(&self, books: &'a [Book]) -> ListingPage<'a> {
        let matching = filter_books(books, &self.search);
        let pages = total_pages(matching.len(), self.per_page);
        ListingPage {
            books: paginate(&matching, self.page, self.per_page).to_vec(),
            total: matching.len(),
            page: self.page,
            total_pages: pages.max(1),
            has_previous: self.page > 1,
            has_next: self.page < pages,
        }
    }
}

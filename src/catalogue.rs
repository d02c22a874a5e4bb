//! The catalogue aggregate: the ordered registry of categories plus the
//! query and snapshot operations that operate on the whole graph.
//!
//! A `Catalogue` is an explicit context object. Construct one at process
//! start and pass it by reference to whatever needs it; there is no hidden
//! global instance, so tests (and unusual embeddings) can hold several
//! isolated catalogues side by side.

use std::path::Path;

use crate::db::{self, SaveOptions};
use crate::error::{CatalogueError, CatalogueResult};
use crate::models::Category;

/// Which collections a [`Catalogue::search`] call scans and whether it stops
/// at the first hit. The default scans everything and reports every match.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Stop after the first match of any kind. "First" is global: the scan
    /// ends as soon as anything matches, whether it was a category name or a
    /// book inside one.
    pub first_occurrence: bool,
    /// Match against category names.
    pub search_categories: bool,
    /// Match against book titles, authors, and ISBNs.
    pub search_books: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            first_occurrence: false,
            search_categories: true,
            search_books: true,
        }
    }
}

/// One hit reported by [`Catalogue::search`]. Book matches carry the owning
/// category so a front end can print the familiar
/// `Found <title> by <author> in <category>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMatch {
    Category {
        name: String,
    },
    Book {
        title: String,
        author: String,
        category: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The whole library: every category in insertion order, each owning its
/// books. Mutation methods assume single-threaded access; a multi-threaded
/// embedding must wrap the catalogue in its own lock.
pub struct Catalogue {
    pub categories: Vec<Category>,
}

impl Catalogue {
    /// Create an empty catalogue with its own freshly built container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalogue pre-populated with `categories`, in order.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Register a category at the end of the list. No duplicate-name check;
    /// two categories may share a name and are then distinguished only by
    /// position.
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Remove the first category with the given name and hand it back, books
    /// and all. Fails with [`CatalogueError::NotFound`] when no category
    /// carries that name.
    pub fn remove_category(&mut self, name: &str) -> CatalogueResult<Category> {
        let position = self
            .categories
            .iter()
            .position(|category| category.name == name)
            .ok_or_else(|| CatalogueError::NotFound(format!("category '{name}'")))?;

        Ok(self.categories.remove(position))
    }

    /// Look up the first category with the given name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Mutable lookup, for shelving and unshelving books on a registered
    /// category.
    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    /// Render every category name in order, optionally followed by the
    /// category's book lines. Pure read.
    pub fn list_categories(&self, include_books: bool) -> Vec<String> {
        let mut lines = Vec::new();
        for category in &self.categories {
            lines.push(category.name.clone());
            if include_books {
                lines.extend(category.list_books());
            }
        }
        lines
    }

    /// Case-insensitive substring search across the catalogue. Categories are
    /// scanned in order; within each, the category name is checked first
    /// (when enabled), then every book's title, author, and ISBN (when
    /// enabled). No match is a normal empty result, never an error.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchMatch> {
        let needle = query.to_lowercase();
        let mut matches = Vec::new();

        for category in &self.categories {
            if options.search_categories && category.name.to_lowercase().contains(&needle) {
                matches.push(SearchMatch::Category {
                    name: category.name.clone(),
                });
                if options.first_occurrence {
                    return matches;
                }
            }

            if options.search_books {
                for book in &category.books {
                    let hit = book.title.to_lowercase().contains(&needle)
                        || book.author.to_lowercase().contains(&needle)
                        || book.isbn.to_lowercase().contains(&needle);
                    if hit {
                        matches.push(SearchMatch::Book {
                            title: book.title.clone(),
                            author: book.author.clone(),
                            category: category.name.clone(),
                        });
                        if options.first_occurrence {
                            return matches;
                        }
                    }
                }
            }
        }

        matches
    }

    /// Write the full catalogue graph to a snapshot file at `path`. See
    /// [`SaveOptions`] for the collision and directory-creation knobs; the
    /// failure modes are [`CatalogueError::AlreadyExists`] and
    /// [`CatalogueError::PathUnavailable`], both recoverable.
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> CatalogueResult<()> {
        db::save_catalogue(self, path.as_ref(), options)
    }

    /// Reconstruct a catalogue from a snapshot file. Fails with
    /// [`CatalogueError::Missing`] when the path does not exist and
    /// [`CatalogueError::CorruptData`] when it exists but is not a valid
    /// snapshot; the underlying cause of corruption is logged, not raised.
    pub fn load(path: impl AsRef<Path>) -> CatalogueResult<Catalogue> {
        db::load_catalogue(path.as_ref())
    }
}

//! Domain models for the catalogue: books with their variant kinds, the
//! categories that own them, and the user/order pair that records borrows.
//! These types stay light-weight data holders so the aggregate and the
//! persistence layer can focus on composition and storage logic.

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::error::{CatalogueError, CatalogueResult};

/// Wall-clock display pattern used for borrow and due dates, e.g.
/// `Mon, 01 Jan 2024 09:30:00`.
const DATE_DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// The kind of a catalogued item. Plain books carry no payload; each of the
/// other kinds adds exactly one descriptive field and otherwise behaves
/// identically for ownership and search purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookKind {
    Standard,
    Dictionary { language: String },
    Encyclopedia { subject: String },
    Magazine { issue: String },
    Newspaper { issue: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single catalogued item. The `category` field is a back-reference to the
/// owning category, stored by name so the link survives serialization; it is
/// maintained by [`Category::add_book`] and [`Category::remove_book`], and
/// when set it always names a category whose collection holds this book.
pub struct Book {
    /// Title displayed in listings and matched by search.
    pub title: String,
    /// Author field, also matched by search.
    pub author: String,
    /// Raw ISBN text. No format validation is performed; search treats it as
    /// one more matchable field.
    pub isbn: String,
    /// Variant payload, `Standard` for a plain book.
    pub kind: BookKind,
    /// Name of the owning category, `None` for a book not yet shelved.
    pub category: Option<String>,
}

impl Book {
    /// Create a plain book. Field contents are accepted verbatim; empty
    /// strings and malformed ISBNs are the caller's business.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::with_kind(title, author, isbn, BookKind::Standard)
    }

    /// Create a dictionary, recording the language it covers.
    pub fn dictionary(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::Dictionary {
                language: language.into(),
            },
        )
    }

    /// Create an encyclopedia, recording its subject.
    pub fn encyclopedia(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::Encyclopedia {
                subject: subject.into(),
            },
        )
    }

    /// Create a magazine, recording its issue.
    pub fn magazine(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::Magazine {
                issue: issue.into(),
            },
        )
    }

    /// Create a newspaper, recording its issue.
    pub fn newspaper(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::Newspaper {
                issue: issue.into(),
            },
        )
    }

    fn with_kind(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        kind: BookKind,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            kind,
            category: None,
        }
    }

    /// Point the back-reference at a category by name. This is the low-level
    /// half of shelving a book: it does not register the book into the
    /// category's collection, so calling it on its own leaves the two sides
    /// inconsistent. Use [`Category::add_book`] instead.
    pub fn assign_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    /// One-line description including the variant payload when present.
    pub fn describe(&self) -> String {
        let base = format!("{} by {}", self.title, self.author);
        match &self.kind {
            BookKind::Standard => base,
            BookKind::Dictionary { language } => format!("{base} ({language} dictionary)"),
            BookKind::Encyclopedia { subject } => format!("{base} (encyclopedia of {subject})"),
            BookKind::Magazine { issue } => format!("{base} (magazine issue {issue})"),
            BookKind::Newspaper { issue } => format!("{base} (newspaper issue {issue})"),
        }
    }

    /// Whether two books describe the same catalogued item. The comparison
    /// covers every catalogued field but deliberately ignores the category
    /// back-reference, so a caller's unshelved copy still matches the shelved
    /// one during removal.
    pub fn same_item(&self, other: &Book) -> bool {
        self.title == other.title
            && self.author == other.author
            && self.isbn == other.isbn
            && self.kind == other.kind
    }
}

impl fmt::Display for Book {
    /// The `title by author` form used by listings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named, ordered collection of books. The category owns its books for
/// listing and removal purposes; order is insertion order and duplicates are
/// permitted (adding the same book twice yields two entries).
pub struct Category {
    pub name: String,
    pub books: Vec<Book>,
}

impl Category {
    /// Create an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            books: Vec::new(),
        }
    }

    /// Append a book to the collection and point its back-reference here.
    /// Emits the human-readable confirmation line front ends listen for.
    pub fn add_book(&mut self, mut book: Book) {
        book.assign_category(self.name.clone());
        tracing::info!("{} added to category: {}", book.title, self.name);
        self.books.push(book);
    }

    /// Remove the first entry matching `book` (see [`Book::same_item`]) and
    /// hand it back with its back-reference cleared, so no book ever points
    /// at a category that no longer holds it. Fails with
    /// [`CatalogueError::NotFound`] when no entry matches.
    pub fn remove_book(&mut self, book: &Book) -> CatalogueResult<Book> {
        let position = self
            .books
            .iter()
            .position(|held| held.same_item(book))
            .ok_or_else(|| CatalogueError::NotFound(format!("book '{}'", book.title)))?;

        let mut removed = self.books.remove(position);
        removed.category = None;
        Ok(removed)
    }

    /// `title by author` lines for every book, in collection order.
    pub fn list_books(&self) -> Vec<String> {
        self.books.iter().map(Book::to_string).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
/// A library patron. Orders are registered explicitly through
/// [`User::add_order`]; constructing an [`Order`] never appends it anywhere
/// on its own.
pub struct User {
    pub name: String,
    pub orders: Vec<Order>,
}

impl User {
    /// Create a user with no orders.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orders: Vec::new(),
        }
    }

    /// Record an order against this user.
    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }
}

#[derive(Debug, Clone)]
/// A borrowing record linking one book and one user. The two references are
/// captured as their identifying fields at construction time; the record is
/// immutable afterwards apart from derived queries.
pub struct Order {
    pub book_title: String,
    pub book_isbn: String,
    pub borrower: String,
    /// Wall-clock time at construction.
    pub date_borrowed: DateTime<Utc>,
    /// Caller-supplied due date. May already be in the past; no validation.
    pub date_due: DateTime<Utc>,
}

impl Order {
    /// Create an order for `book` borrowed by `borrower`, due at `date_due`.
    /// The borrow timestamp is taken from the wall clock now.
    pub fn new(book: &Book, borrower: &User, date_due: DateTime<Utc>) -> Self {
        Self {
            book_title: book.title.clone(),
            book_isbn: book.isbn.clone(),
            borrower: borrower.name.clone(),
            date_borrowed: Utc::now(),
            date_due,
        }
    }

    /// Whether the order is due, i.e. the wall clock has reached `date_due`.
    pub fn is_due(&self) -> bool {
        Utc::now() >= self.date_due
    }

    /// Due date formatted for display in the local timezone.
    pub fn due_display(&self) -> String {
        self.date_due
            .with_timezone(&Local)
            .format(DATE_DISPLAY_FORMAT)
            .to_string()
    }

    /// Borrow date formatted for display in the local timezone.
    pub fn borrowed_display(&self) -> String {
        self.date_borrowed
            .with_timezone(&Local)
            .format(DATE_DISPLAY_FORMAT)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn potter() -> Book {
        Book::new("Harry Potter", "J.K. Rowling", "123456789")
    }

    #[test]
    fn new_book_starts_unshelved() {
        let book = potter();
        assert_eq!(book.kind, BookKind::Standard);
        assert!(book.category.is_none());
    }

    #[test]
    fn add_book_sets_back_reference_and_appends() {
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());

        assert_eq!(fantasy.books.len(), 1);
        assert_eq!(fantasy.books[0].category.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn duplicate_adds_produce_two_entries() {
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());
        fantasy.add_book(potter());

        assert_eq!(fantasy.books.len(), 2);
    }

    #[test]
    fn remove_book_clears_back_reference() {
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());

        let removed = fantasy.remove_book(&potter()).unwrap();
        assert!(removed.category.is_none());
        assert!(fantasy.books.is_empty());
    }

    #[test]
    fn remove_absent_book_reports_not_found() {
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());
        fantasy.remove_book(&potter()).unwrap();

        let err = fantasy.remove_book(&potter()).unwrap_err();
        assert!(matches!(err, CatalogueError::NotFound(_)));
    }

    #[test]
    fn remove_matches_ignore_back_reference() {
        // The caller's handle was never shelved, but it still identifies the
        // shelved copy.
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());

        let unshelved = potter();
        assert!(unshelved.category.is_none());
        assert!(fantasy.remove_book(&unshelved).is_ok());
    }

    #[test]
    fn remove_matches_distinguish_variants() {
        let mut reference = Category::new("Reference");
        reference.add_book(Book::dictionary("Lexicon", "N. Webster", "111", "English"));

        let plain = Book::new("Lexicon", "N. Webster", "111");
        assert!(matches!(
            reference.remove_book(&plain),
            Err(CatalogueError::NotFound(_))
        ));
    }

    #[test]
    fn list_books_formats_title_by_author() {
        let mut fantasy = Category::new("Fantasy");
        fantasy.add_book(potter());
        fantasy.add_book(Book::new("The Hobbit", "J.R.R. Tolkien", "987654321"));

        assert_eq!(
            fantasy.list_books(),
            vec![
                "Harry Potter by J.K. Rowling".to_string(),
                "The Hobbit by J.R.R. Tolkien".to_string(),
            ]
        );
    }

    #[test]
    fn describe_includes_variant_payload() {
        let dict = Book::dictionary("Lexicon", "N. Webster", "111", "English");
        assert_eq!(dict.describe(), "Lexicon by N. Webster (English dictionary)");

        let plain = potter();
        assert_eq!(plain.describe(), "Harry Potter by J.K. Rowling");
    }

    #[test]
    fn orders_are_registered_explicitly() {
        let book = potter();
        let mut alice = User::new("Alice Johnson");
        let order = Order::new(&book, &alice, Utc::now() + Duration::days(7));

        assert!(alice.orders.is_empty());
        alice.add_order(order);
        assert_eq!(alice.orders.len(), 1);
        assert_eq!(alice.orders[0].book_title, "Harry Potter");
        assert_eq!(alice.orders[0].borrower, "Alice Johnson");
    }

    #[test]
    fn order_due_boundary() {
        let book = potter();
        let bob = User::new("Bob Williams");

        let overdue = Order::new(&book, &bob, Utc::now() - Duration::seconds(1));
        assert!(overdue.is_due());

        let outstanding = Order::new(&book, &bob, Utc::now() + Duration::hours(1));
        assert!(!outstanding.is_due());
    }

    #[test]
    fn past_due_dates_are_accepted_at_construction() {
        let book = potter();
        let bob = User::new("Bob Williams");
        let order = Order::new(&book, &bob, Utc::now() - Duration::days(30));
        assert!(order.is_due());
    }
}

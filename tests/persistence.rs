//! Integration tests for the on-disk snapshot: full-graph round-trips and
//! every filesystem-level failure mode a caller is expected to handle.

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

use library_catalogue::{Book, Catalogue, CatalogueError, Category, SaveOptions};

/// Two categories, four books, one variant with a payload worth checking.
fn sample_catalogue() -> Catalogue {
    let mut fantasy = Category::new("Fantasy");
    fantasy.add_book(Book::new("Harry Potter", "J.K Rowling", "123456789"));
    fantasy.add_book(Book::new(
        "The Lord of the Rings",
        "J.R.R. Tolkien",
        "987654321",
    ));

    let mut reference = Category::new("Reference");
    reference.add_book(Book::dictionary(
        "Webster's Dictionary",
        "Noah Webster",
        "555000111",
        "English",
    ));
    reference.add_book(Book::encyclopedia(
        "Britannica",
        "Various",
        "555000222",
        "General knowledge",
    ));

    Catalogue::with_categories(vec![fantasy, reference])
}

#[test]
fn round_trip_preserves_the_whole_graph() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("TestCatalogue.catalogue");

    let original = sample_catalogue();
    original.save(&path, &SaveOptions::default())?;

    let restored = Catalogue::load(&path)?;
    assert_eq!(restored, original);

    // Spot-check the pieces the equality above relies on: back-references
    // and the variant payload.
    let reference = restored.category("Reference").unwrap();
    assert_eq!(reference.books.len(), 2);
    for book in &reference.books {
        assert_eq!(book.category.as_deref(), Some("Reference"));
    }
    assert_eq!(
        reference.books[0].describe(),
        "Webster's Dictionary by Noah Webster (English dictionary)"
    );
    Ok(())
}

#[test]
fn empty_catalogue_round_trips() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("empty.catalogue");

    Catalogue::new().save(&path, &SaveOptions::default())?;
    let restored = Catalogue::load(&path)?;
    assert!(restored.categories.is_empty());
    Ok(())
}

#[test]
fn save_refuses_to_clobber_without_overwrite() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("TestCatalogue.catalogue");

    sample_catalogue().save(&path, &SaveOptions::default())?;
    let bytes_before = fs::read(&path)?;

    let err = Catalogue::new()
        .save(&path, &SaveOptions::default())
        .unwrap_err();
    assert!(matches!(err, CatalogueError::AlreadyExists(_)));

    // The refused save must leave the original snapshot untouched.
    assert_eq!(fs::read(&path)?, bytes_before);
    Ok(())
}

#[test]
fn overwrite_replaces_the_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("TestCatalogue.catalogue");

    sample_catalogue().save(&path, &SaveOptions::default())?;

    let mut smaller = Catalogue::new();
    smaller.add_category(Category::new("Mystery"));
    smaller.save(
        &path,
        &SaveOptions {
            overwrite: true,
            ..SaveOptions::default()
        },
    )?;

    let restored = Catalogue::load(&path)?;
    assert_eq!(restored, smaller);
    Ok(())
}

#[test]
fn load_of_missing_path_reports_missing() {
    let err = Catalogue::load("/nonexistent/path/TestCatalogue.catalogue").unwrap_err();
    assert!(matches!(err, CatalogueError::Missing(_)));
}

#[test]
fn load_of_garbage_file_reports_corrupt_data() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("garbage.catalogue");
    fs::write(&path, b"this is not a catalogue snapshot")?;

    let err = Catalogue::load(&path).unwrap_err();
    assert!(matches!(err, CatalogueError::CorruptData(_)));
    Ok(())
}

#[test]
fn missing_parent_fails_when_make_dirs_is_off() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("saved").join("TestCatalogue.catalogue");

    let err = sample_catalogue()
        .save(
            &path,
            &SaveOptions {
                make_dirs: false,
                ..SaveOptions::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogueError::PathUnavailable(_)));
    assert!(!path.exists());
    Ok(())
}

#[test]
fn make_dirs_creates_missing_parents() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir
        .path()
        .join("saved")
        .join("nested")
        .join("TestCatalogue.catalogue");

    sample_catalogue().save(&path, &SaveOptions::default())?;
    assert!(path.is_file());

    let restored = Catalogue::load(&path)?;
    assert_eq!(restored.categories.len(), 2);
    Ok(())
}

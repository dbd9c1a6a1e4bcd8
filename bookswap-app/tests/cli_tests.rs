//! Integration tests for the Bookswap terminal front end

mod common;

use assert_cmd::Command;
use common::{dead_api_base, phone_listing, spawn_backend, Backend};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bookswap() -> Command {
    let mut cmd = Command::cargo_bin("bookswap-app").unwrap();
    cmd.env_remove("BOOKSWAP_API_BASE");
    cmd
}

#[test]
fn test_help() {
    bookswap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_list_help() {
    bookswap()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--photo"))
        .stdout(predicate::str::contains("--contact-method"))
        .stdout(predicate::str::contains("giveaway"));
}

#[test]
fn test_browse_with_backend_down() {
    bookswap()
        .args(["--api-base", &dead_api_base(), "browse"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books listed yet."));
}

#[test]
fn test_api_base_from_env() {
    bookswap()
        .env("BOOKSWAP_API_BASE", dead_api_base())
        .arg("browse")
        .assert()
        .success()
        .stdout(predicate::str::contains("Community Book Exchange"));
}

#[test]
fn test_list_without_photo() {
    bookswap()
        .args([
            "--api-base",
            &dead_api_base(),
            "list",
            "--title",
            "1984",
            "--author",
            "George Orwell",
            "--price",
            "3.5",
            "--owner",
            "Bob",
            "--contact-info",
            "bob@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a photo."))
        .stderr(predicate::str::contains("Book was not listed"));
}

#[test]
fn test_list_missing_photo_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.jpg");

    bookswap()
        .args(["--api-base", &dead_api_base(), "list", "--title", "T"])
        .arg("--photo")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read photo"));
}

#[test]
fn test_show_out_of_range() {
    bookswap()
        .args(["--api-base", &dead_api_base(), "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No listing number 1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_against_backend() {
    let backend = Backend::with_listings(vec![phone_listing(1, "Emma")]);
    let base = spawn_backend(backend.router()).await;

    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("cover.png");
    fs::write(&photo, [0x89, 0x50, 0x4E, 0x47]).unwrap();

    let assert = tokio::task::spawn_blocking(move || {
        bookswap()
            .args([
                "--api-base",
                &base,
                "list",
                "--title",
                "1984",
                "--author",
                "George Orwell",
                "--price",
                "3.5",
                "--owner",
                "Bob",
                "--contact-info",
                "bob@example.com",
            ])
            .arg("--photo")
            .arg(&photo)
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("[1] 1984  💰 $3.50"))
        .stdout(predicate::str::contains("[2] Emma  🎁 FREE"));
    assert_eq!(*backend.uploads.lock().unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_show_and_contact_by_phone() {
    let backend = Backend::with_listings(vec![phone_listing(7, "Emma")]);
    let base = spawn_backend(backend.router()).await;

    let assert = tokio::task::spawn_blocking(move || {
        bookswap()
            .args(["--api-base", &base, "show", "1", "--contact"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Type: 🎁 Free Giveaway"))
        .stdout(predicate::str::contains("[📞 Copy Phone Number]"))
        .stdout(predicate::str::contains("\x1b]52;c;NTU1LTAxMDE=\x07"))
        .stderr(predicate::str::contains(
            "Phone number copied to clipboard: 555-0101",
        ));
}

//! Walks through a short lending session in-process and logs each step.

use anyhow::Context;
use chrono::NaiveDate;
use lending_desk::{
    config::AppConfig,
    logging,
    models::{CreateBook, CreateMember},
    services::{lending::LendingService, stats::StatsService},
};

fn date(y: i32, m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("invalid date {}-{}-{}", y, m, d))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_demo();

    let config = AppConfig::load().context("loading configuration")?;
    let mut lending = LendingService::new(config.loans);

    let hobbit = lending.register_book(CreateBook {
        title: "The Hobbit".to_string(),
        author: "J.R.R. Tolkien".to_string(),
        isbn: "978-0-261-10221-7".to_string(),
        publication_date: date(1937, 9, 21)?,
        genre: Some("fantasy".to_string()),
    })?;
    let dune = lending.register_book(CreateBook {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: "978-0-441-17271-9".to_string(),
        publication_date: date(1965, 8, 1)?,
        genre: Some("science fiction".to_string()),
    })?;

    let ada = lending.register_member(CreateMember {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.org".to_string(),
        phone: None,
    })?;
    let grace = lending.register_member(CreateMember {
        name: "Grace Hopper".to_string(),
        email: "grace@example.org".to_string(),
        phone: Some("555-0100".to_string()),
    })?;

    let loan = lending.create_loan(hobbit.id, ada.id)?;
    tracing::info!(
        "{} borrowed \"{}\" until {}",
        ada.name,
        hobbit.title,
        loan.due_date.format("%Y-%m-%d")
    );

    // Already on loan: refused and logged by the service
    if lending.create_loan(hobbit.id, grace.id).is_err() {
        tracing::info!("{} has to wait for \"{}\"", grace.name, hobbit.title);
    }

    lending.create_loan(dune.id, grace.id)?;

    for book in lending.find_books_by_author("tolkien") {
        tracing::info!("By Tolkien: {} (available: {})", book.title, book.available);
    }
    for book in lending.books_on_loan_for(grace.id) {
        tracing::info!("{} holds \"{}\"", grace.name, book.title);
    }

    lending.return_loan(loan.id)?;
    let hobbit = lending.get_book(hobbit.id)?;
    tracing::info!("\"{}\" available again: {}", hobbit.title, hobbit.available);

    // Second return is refused
    if let Err(e) = lending.return_loan(loan.id) {
        tracing::info!("Second return of loan {} refused: {}", loan.id, e);
    }

    let stats = StatsService::new().compute(&lending);
    tracing::info!(
        "Books: {} total, {} on loan; loans: {} active, {} returned",
        stats.books.total,
        stats.books.on_loan,
        stats.loans.active,
        stats.loans.returned
    );

    Ok(())
}

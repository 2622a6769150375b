//! Integration tests for the scraper

mod crawl_tests;

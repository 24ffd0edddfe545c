//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the site and tempfile for the
//! output directory, exercising each stage and both full flows end-to-end.


mod coordinator_tests;
mod walker_tests;

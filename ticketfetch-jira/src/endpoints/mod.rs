//! # Jira API Endpoints
//!
//! Endpoint implementations on [`crate::JiraClient`].

pub mod search;

//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod auth;
pub mod cuisines;
pub mod health;
pub mod restaurants;
pub mod reviews;
pub mod users;

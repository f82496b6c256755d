//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application.

pub mod byte_cursor;

/*!
 * Session management for caption tracks.
 *
 * This module provides:
 * - Installing a fully built cue store as the current session
 * - Wholesale track replacement and session reset
 * - Read-only snapshots for presentation layers
 */

// Allow dead code - session types have extra methods for future use
#![allow(dead_code)]

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::SessionManager;
pub use models::{SessionCreateParams, SessionInfo};

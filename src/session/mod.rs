/*!
 * Session state module.
 *
 * This module provides:
 * - The single-owner state object for the current document
 * - The per-run state machine (idle, translating, completed, failed)
 * - Run tickets carrying the language snapshot taken at run start
 */

pub mod models;

// Re-export main types
pub use models::{RunState, RunTicket, Session};

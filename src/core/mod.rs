//! # Core Session Logic
//!
//! The conversation, the scroll position and the prompt line, plus the
//! reducer that changes them. It knows nothing about terminals or escape
//! sequences.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │ inference  │
//!            │  Adapter   │            │ (replies)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`conversation`]: Bounded log of display lines
//! - [`scroll`]: Viewport offset with bottom-follow
//! - [`input_line`]: The prompt buffer
//! - [`geometry`]: Terminal size snapshot
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod geometry;
pub mod input_line;
pub mod scroll;
pub mod state;

//! Constraint Chat - conversational client for scheduling constraints
//!
//! Sends a chat transcript to a language-model backend and applies what
//! comes back: typed scheduling constraints, plain replies with citations,
//! or tool activity revealed step by step.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Controlled vocabularies and the matching logic built on them.
//!
//! Three closed lists drive parameter normalization: subjects (formatted
//! `"CODE - Description"`), organizer groups, and event categories. The
//! lists are loaded once at startup (see the infrastructure vocab loader)
//! and never mutated afterwards, so sharing them across concurrent
//! conversations needs no synchronization.

pub mod entities;
pub mod matching;
pub mod resolver;

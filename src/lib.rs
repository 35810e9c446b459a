//! tdesk: translation desk
//!
//! A small toolkit for translator workspaces built around a hand-edited
//! XLIFF file, plain-text source and target files, and a glossary.

pub mod cli;
pub mod core;

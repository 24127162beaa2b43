//! Source-tree primitives: what gets linked or rendered, and where.
//!
//! - [`linkable`] discovers linkable files and resolves their install targets
//!   (including in-file location overrides).
//! - [`template`] discovers template sources and renders them.
//!
//! Tasks decide what to do with these; nothing here prompts.
pub mod linkable;
pub mod template;

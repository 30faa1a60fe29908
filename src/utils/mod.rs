//! Cross-cutting helpers shared by the operations layer.

pub mod parallel;

//! Capability traits and interfaces

pub mod contrast;
pub mod filter;
pub mod operation;
pub mod question_answer;
pub mod sentence;
pub mod tagging;
pub mod transformation;


// Re-export main types for convenience
pub use contrast::*;
pub use filter::*;
pub use operation::*;
pub use question_answer::*;
pub use sentence::*;
pub use tagging::*;
pub use transformation::*;

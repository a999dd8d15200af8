//! Utility modules

pub mod text;
pub mod utf16;

pub use text::{char_type, is_printable, is_punctuation, CharType};
pub use utf16::{code_points, encode, CodePoint};

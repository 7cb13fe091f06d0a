//! Procedural words and names for the tongues of Telisar.

pub mod grammar;
pub mod names;
pub mod tongues;

pub use grammar::{Grapheme, Language, LanguageDef, LanguageError, Validator, Words};
pub use names::{Ancestry, NameGenerator, PersonName};

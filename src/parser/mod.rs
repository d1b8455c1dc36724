//! Text-level machinery shared by the Newick and Nexus readers: a byte
//! cursor, the parsing error type, annotation stripping and label escaping.
pub mod byte_parser;
pub mod parsing_error;
pub mod preprocess;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
pub use preprocess::TreeFormat;

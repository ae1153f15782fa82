mod comment;
mod reader;
mod statement;

pub use comment::strip_comments;
pub use reader::{parse_program, SourceLine};
pub use statement::{classify_statement, is_block_opener, parse_block_header, BlockHeader};

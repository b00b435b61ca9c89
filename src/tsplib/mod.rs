//! Static TSPLIB-style instance parsing (spec §4.1).

mod parser;

pub use parser::{parse, parse_file, ParsedInstance};

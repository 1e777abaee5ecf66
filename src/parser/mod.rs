pub mod primitive_parser;
pub mod reader;
pub mod song_parser;
mod song_parser_tests;
pub mod symbols;

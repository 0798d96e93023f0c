pub mod fulltext;
pub mod input;

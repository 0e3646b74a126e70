pub mod content_file;
pub mod front_matter;

pub mod bookmark_source;

pub mod read;

pub use read::{DocumentContext, InputError, read_document};

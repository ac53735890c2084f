#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

mod build;
pub mod codec;
mod error;
mod index;
mod key;
mod lookup;
mod record;
pub mod scan;

pub type Result<T> = std::result::Result<T, Error>;

pub use build::IndexBuilder;
pub use error::Error;
pub use index::Index;
pub use key::KeyLength;
pub use lookup::{Listing, Lookup};
pub use record::Record;
pub use scan::Scanner;

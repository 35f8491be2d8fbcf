mod traits;
mod memory;
mod file;

pub use traits::*;
pub use memory::*;
pub use file::*;

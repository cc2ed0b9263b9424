pub mod encoding;
pub mod logging;

pub use encoding::fix_garbled_symbols;

mod multibyte;
pub mod utils;

#[macro_use]
extern crate log;

pub mod assignment;
pub mod bench;
pub mod formula;
pub mod parser;
pub mod prelude;
pub mod random;
pub mod report;
pub mod solver;

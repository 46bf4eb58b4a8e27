#[macro_use]
mod util;

mod number;
mod grouping;
mod evaluation;
mod equations;
mod units;

//! Problem instances: points, the Euclidean metric, and the file reader.

mod point;
mod reader;
mod types;

pub use point::{distance, Point};
pub use reader::{parse_problem, read_problem_file};
pub use types::ProblemInstance;

pub mod gate;

pub use gate::{intercept, EdgeGate, PathMatcher, EXCLUDED_PREFIXES};

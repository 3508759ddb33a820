mod aggregate;
mod level;

pub use aggregate::{aggregate, overall_score};
pub use level::{classify, LegacyRawScale};

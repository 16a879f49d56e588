mod error;
mod normalize;
mod projection;
mod types;

pub use error::ValidationError;
pub use normalize::{normalize, parse_value, sanitize, validate};
pub use projection::project;
pub use types::{Field, FieldSpec, InputDomain, NormalizedField, ProjectionResult};

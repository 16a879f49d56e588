mod debounce;
mod display;
mod form;
mod presets;

pub use debounce::{DEFAULT_QUIET_INTERVAL, Debouncer};
pub use display::{DisplayValues, format_currency, progress_ratio};
pub use form::{Calculation, CalculatorForm, calculate};
pub use presets::{DEFAULT_INPUTS, PRESETS, Preset, find_preset};

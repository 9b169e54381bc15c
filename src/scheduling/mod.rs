// Pure scheduling core: date arithmetic, recurrence expansion, stay-range
// derivation and calendar aggregation. Nothing in this module touches the
// store or the transport layer; services feed it rows and persist its output.

pub mod aggregate;
pub mod dates;
pub mod recurrence;
pub mod stay_range;

// Resume generation: a pure aggregation step over the user's achievements,
// plus the service that loads inputs and stores the resulting document.

pub mod aggregator;
pub mod handlers;
pub mod service;

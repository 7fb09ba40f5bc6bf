// Domain layer: models and ports. No dependencies on the HTTP or config
// layers; serde only where the CRM API shapes require it.

pub mod model;
pub mod ports;

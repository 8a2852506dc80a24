// Domain layer: models, page labels and ports. No I/O here.

pub mod locale;
pub mod model;
pub mod ports;

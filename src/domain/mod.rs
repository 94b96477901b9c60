pub mod camera;
pub mod device;
pub mod inputs;
pub mod light;
pub mod scenario;
pub mod thermostat;

pub use camera::*;
pub use device::*;
pub use inputs::*;
pub use light::*;
pub use scenario::*;
pub use thermostat::*;

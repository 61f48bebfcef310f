pub mod axis_monitor;
pub mod demux;
pub mod window;


pub use axis_monitor::*;
pub use demux::*;
pub use window::*;

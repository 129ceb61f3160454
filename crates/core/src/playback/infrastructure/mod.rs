pub mod simulated_transport;
pub mod timer_driver;

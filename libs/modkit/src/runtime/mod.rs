mod shutdown;

pub use shutdown::{shutdown_signal, wait_for_shutdown};

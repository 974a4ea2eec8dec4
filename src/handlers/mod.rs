pub(crate) mod chrome_handler;
pub(crate) mod monitor_handler;
pub(crate) mod taskbar_handler;

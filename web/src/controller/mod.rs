pub(crate) mod event_stream_controller;
pub(crate) mod health_check_controller;

mod property_log;
mod tracing_events;

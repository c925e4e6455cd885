//! Azure resource health report: collect, analyze, render.

pub use azhealth_adapter_azure as azure;
pub use azhealth_application as application;
pub use azhealth_domain as domain;
pub use azhealth_ports as ports;

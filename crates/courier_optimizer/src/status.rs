pub mod address_correction;
pub mod exception_policy;
pub mod status_resolver;

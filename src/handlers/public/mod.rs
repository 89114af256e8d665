// handlers/public - no session required
pub mod service;

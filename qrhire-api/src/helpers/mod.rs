pub mod paths;
pub mod session;

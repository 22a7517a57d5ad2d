pub mod lifecycle;
pub mod resolver;
pub mod share_code;

pub use lifecycle::MovieNightService;
pub use share_code::ShareCodeIssuer;

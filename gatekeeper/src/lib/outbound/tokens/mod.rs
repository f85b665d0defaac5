pub mod jwt;

pub use jwt::JwtTokenService;

pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::Account;
pub use requests::{LoginRequest, SignupRequest};
pub use responses::{LoginResponse, MeResponse, RefreshTokenResponse};

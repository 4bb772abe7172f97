/// Authentication module
///
/// Password hashing, stateless access tokens, store-backed refresh tokens, and
/// the gateway that orchestrates them.

mod claims;
mod gateway;
mod jwt;
mod password;
mod refresh_token;

pub use claims::Claims;
pub use gateway::{bearer_token, ensure_owner, AuthGateway, LoginSession};
pub use jwt::{
    access_token_ttl, make_access_token, validate_access_token, AccessTokenError,
    ACCESS_TOKEN_TTL_SECS, TOKEN_ISSUER,
};
pub use password::{hash_password, verify_password, HashingError, PASSWORD_HASH_COST};
pub use refresh_token::{
    generate_refresh_token, RefreshTokenError, RefreshTokenStore, REFRESH_TOKEN_TTL_DAYS,
};

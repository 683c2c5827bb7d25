//! Account and session models shared by login, signup and password reset.

pub mod model;

pub use model::{
    AuthError, AuthSession, Credentials, PasswordResetRequest, SignupRequest, User,
    UNEXPECTED_ERROR_MESSAGE,
};

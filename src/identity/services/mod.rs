//! Application services for registration, login, and user management.

mod account;

pub use account::{
    AccountError, AccountResult, AccountService, LoginRequest, LoginResponse,
    RegisterUserRequest, UpdateUserRequest,
};

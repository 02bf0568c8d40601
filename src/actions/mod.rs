//! Identity workflows behind the HTTP auth endpoints.
//!
//! Each action is built from its dependencies with `new()` and run with
//! `execute()`. Store work inside an action runs under the action's timeout
//! (5 seconds unless changed with `with_timeout`).

pub mod current_user;
pub mod login;
pub mod logout;
pub mod register;

pub use current_user::CurrentUserAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use register::RegisterAction;

// handlers/public/auth/mod.rs - Account registration and token acquisition

pub mod login;    // POST /api/auth/login - verify credentials and mint a JWT
pub mod register; // POST /api/user - create an account

pub use login::login_post;
pub use register::register_post;

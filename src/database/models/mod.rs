pub mod article;
pub mod user;

pub use article::{Article, ArticleChanges};
pub use user::{NewUser, User};

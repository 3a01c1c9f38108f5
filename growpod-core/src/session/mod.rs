//! Sign-in session and the local cache of previously seen users.

mod oauth;
mod user_cache;

pub use oauth::{OAuthSession, SessionState, SignInProvider, SocialUser};
pub use user_cache::{CachedUser, UserRepository};

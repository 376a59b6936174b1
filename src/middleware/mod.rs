/// HTTP middleware utilities
///
/// Session extraction from the provider-issued cookie. Two extractors:
/// `CurrentUser` fails the request with 401 when no valid session is
/// present; `MaybeUser` yields `None` instead, for pages that render both
/// signed-in and signed-out variants.
pub mod session;

pub use session::{CurrentUser, MaybeUser};

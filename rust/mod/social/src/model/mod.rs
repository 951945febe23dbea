mod user;
mod tweet;
mod follow;
mod session;

pub use user::*;
pub use tweet::*;
pub use follow::*;
pub use session::*;

// Public handlers: token acquisition and the IP passthrough.
pub mod login;
pub mod myip;

pub use login::login_post;
pub use myip::myip_get;

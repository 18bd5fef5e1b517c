//! HTTP edge: deserializes requests, invokes the operation handlers, and
//! wraps their results into the response envelope. No business logic here.

pub mod avatar;
pub mod media;
pub mod video;
pub mod voice;

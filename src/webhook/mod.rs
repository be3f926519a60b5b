pub mod hmac;
pub mod notification;
pub mod pipeline;
pub mod recent;

pub mod activity;
pub mod child;
pub mod notification;
pub mod subscription;

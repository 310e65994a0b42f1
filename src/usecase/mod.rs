pub mod activities;
pub mod activity_filter;
pub mod children;
pub mod classify;
pub mod contracts;
pub mod error;
pub mod notification_filter;
pub mod notifications;
pub mod recommendations;
pub mod subscriptions;

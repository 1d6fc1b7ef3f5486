//! Request middleware: authentication, role gating, and page redirects.

pub mod auth;
pub mod rbac;
pub mod redirect;

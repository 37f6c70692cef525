mod bridge;
mod error;
mod helpers;

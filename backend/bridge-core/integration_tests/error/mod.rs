mod bridge;
mod server;

mod common;
mod session;

//! Run reporters

mod console;

pub use console::ConsoleReporter;

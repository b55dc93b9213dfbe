//! CSV batch surface: commands in, payments out.

pub mod batch;
pub mod command_reader;
pub mod payment_writer;

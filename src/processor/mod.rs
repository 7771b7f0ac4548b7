pub mod bus;
pub mod cpu;

mod instruction;
mod instruction_set;
mod status_register;

mod common;

mod faculty;
mod student;

mod assistance;
mod common;
